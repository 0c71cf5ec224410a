use anyhow::{Context, Result};
use kube::Client;
use tracing::info;

mod collector;
mod config;
mod kubernetes;
mod parsing;
mod projections;
mod report;
mod summary;
mod types;

use collector::ResourceCollector;
use config::load_config;
use kubernetes::check_cluster_reachable;
use report::InventoryReport;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;

    let client = Client::try_default()
        .await
        .context("failed to load cluster configuration (kubeconfig or in-cluster env)")?;

    // Pre-flight gate: abort before collecting anything if the API is down
    let cluster_info = check_cluster_reachable(&client, &cfg).await?;
    if let Some(version) = &cluster_info.server_version {
        info!("connected to cluster, server {}", version.git_version);
    }

    let collector = ResourceCollector::new(&client, &cfg);
    let mut report = InventoryReport::new(cfg.clone(), cluster_info);

    info!("collecting nodes");
    report.set_nodes(collector.collect_nodes().await);

    info!("collecting workloads");
    report.set_workloads(collector.collect_workloads().await);

    info!("collecting performance configs");
    report.set_performance_configs(collector.collect_performance_configs().await);

    info!("collecting networking");
    report.set_networking(collector.collect_networking().await);

    info!("collecting storage");
    report.set_storage(collector.collect_storage().await);

    info!("collecting events");
    report.set_cluster_events(collector.collect_events().await);

    let document = report.finalize();
    let path = document.write_to(&cfg.output_dir)?;
    info!("report written to {}", path.display());

    print!("{}", document.render_digest());

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
