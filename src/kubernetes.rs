use anyhow::{anyhow, Context, Result};
use kube::Client;
use serde::Deserialize;

use crate::types::{ClusterInfo, Config, ServerVersion};

#[derive(Debug, Deserialize)]
struct VersionInfo {
    major: String,
    minor: String,
    #[serde(rename = "gitVersion")]
    git_version: String,
    platform: String,
}

/// Pre-flight gate: a `/version` call must succeed before any collection
/// starts. An unreachable API server aborts the run.
pub async fn check_cluster_reachable(client: &Client, cfg: &Config) -> Result<ClusterInfo> {
    use http::Request as HttpRequest;
    let req = HttpRequest::builder()
        .method("GET")
        .uri("/version")
        .body(Vec::new())
        .map_err(|e| anyhow!("build request: {}", e))?;

    let version: VersionInfo = client
        .request(req)
        .await
        .context("cluster API is unreachable (GET /version failed)")?;

    Ok(ClusterInfo {
        cluster_name: cfg.cluster_name.clone(),
        server_version: Some(ServerVersion {
            git_version: version.git_version,
            major: version.major,
            minor: version.minor,
            platform: version.platform,
        }),
    })
}
