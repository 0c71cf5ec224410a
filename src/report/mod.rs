use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::summary::{compute_cluster_summary, compute_coverage_metrics, compute_resource_usage};
use crate::types::{
    ClusterInfo, ClusterSummary, Config, CoverageMetrics, EventInventory, NetworkingInventory,
    NodeRecord, PerformanceInventory, ResourceUsage, Section, StorageInventory, WorkloadInventory,
};

/// Accumulates projected sections over one run. Each section is recorded at
/// most once; a second write for the same section is ignored.
pub struct InventoryReport {
    pub config: Config,
    cluster_info: ClusterInfo,
    nodes: Option<Section<NodeRecord>>,
    workloads: Option<WorkloadInventory>,
    performance_configs: Option<PerformanceInventory>,
    networking: Option<NetworkingInventory>,
    storage: Option<StorageInventory>,
    cluster_events: Option<EventInventory>,
}

impl InventoryReport {
    pub fn new(config: Config, cluster_info: ClusterInfo) -> Self {
        Self {
            config,
            cluster_info,
            nodes: None,
            workloads: None,
            performance_configs: None,
            networking: None,
            storage: None,
            cluster_events: None,
        }
    }

    fn record<T>(slot: &mut Option<T>, section: &str, value: T) {
        if slot.is_some() {
            warn!("section {} already recorded; keeping the first write", section);
            return;
        }
        *slot = Some(value);
    }

    pub fn set_nodes(&mut self, nodes: Section<NodeRecord>) {
        Self::record(&mut self.nodes, "nodes", nodes);
    }

    pub fn set_workloads(&mut self, workloads: WorkloadInventory) {
        Self::record(&mut self.workloads, "workloads", workloads);
    }

    pub fn set_performance_configs(&mut self, configs: PerformanceInventory) {
        Self::record(&mut self.performance_configs, "performance_configs", configs);
    }

    pub fn set_networking(&mut self, networking: NetworkingInventory) {
        Self::record(&mut self.networking, "networking", networking);
    }

    pub fn set_storage(&mut self, storage: StorageInventory) {
        Self::record(&mut self.storage, "storage", storage);
    }

    pub fn set_cluster_events(&mut self, events: EventInventory) {
        Self::record(&mut self.cluster_events, "cluster_events", events);
    }

    /// Derives the summary metrics from the accumulated sections and stamps
    /// the collection time. Unset sections come out empty, never missing.
    pub fn finalize(self) -> ReportDocument {
        let nodes = self.nodes.unwrap_or_default();
        let workloads = self.workloads.unwrap_or_default();
        let performance_configs = self.performance_configs.unwrap_or_default();
        let networking = self.networking.unwrap_or_default();
        let storage = self.storage.unwrap_or_default();
        let cluster_events = self.cluster_events.unwrap_or_default();

        let resource_usage = compute_resource_usage(&nodes, &workloads.pods);
        let metrics = compute_coverage_metrics(&workloads, &performance_configs);
        let cluster_summary = compute_cluster_summary(
            &nodes,
            &workloads,
            &networking,
            &storage,
            &cluster_events,
            &resource_usage,
            &metrics,
        );

        ReportDocument {
            collection_timestamp: Utc::now(),
            cluster_info: self.cluster_info,
            nodes,
            workloads,
            performance_configs,
            cluster_events,
            networking,
            storage,
            metrics,
            resource_usage,
            cluster_summary,
        }
    }
}

/// The finished report with its fixed top-level key set.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub collection_timestamp: DateTime<Utc>,
    pub cluster_info: ClusterInfo,
    pub nodes: Section<NodeRecord>,
    pub workloads: WorkloadInventory,
    pub performance_configs: PerformanceInventory,
    pub cluster_events: EventInventory,
    pub networking: NetworkingInventory,
    pub storage: StorageInventory,
    pub metrics: CoverageMetrics,
    pub resource_usage: ResourceUsage,
    pub cluster_summary: ClusterSummary,
}

impl ReportDocument {
    pub fn file_name(&self) -> String {
        format!(
            "cluster-report-{}.json",
            self.collection_timestamp.format("%Y%m%d-%H%M%S")
        )
    }

    /// Writes the report as pretty-printed JSON; returns the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(path)
    }

    /// Human-readable digest of the accumulated document; read-only.
    pub fn render_digest(&self) -> String {
        let s = &self.cluster_summary;
        let u = &self.resource_usage;
        let m = &self.metrics;
        let e = &self.cluster_events;

        let mut out = String::new();
        match self.cluster_info.cluster_name.as_deref() {
            Some(name) => out.push_str(&format!(
                "Cluster report for {} collected at {}\n",
                name,
                self.collection_timestamp.to_rfc3339()
            )),
            None => out.push_str(&format!(
                "Cluster report collected at {}\n",
                self.collection_timestamp.to_rfc3339()
            )),
        }
        if let Some(version) = &self.cluster_info.server_version {
            out.push_str(&format!("Server version: {}\n", version.git_version));
        }
        out.push_str(&format!(
            "Nodes: {} total, {} ready\n",
            s.node_count, s.ready_nodes
        ));
        out.push_str(&format!(
            "Pods: {} total, {} running, {} pending, {} failed\n",
            s.total_pods, s.running_pods, s.pending_pods, s.failed_pods
        ));
        out.push_str(&format!(
            "Workloads: {} deployments, {} statefulsets, {} daemonsets, {} jobs, {} cronjobs\n",
            s.deployment_count,
            s.statefulset_count,
            s.daemonset_count,
            self.workloads.jobs.count,
            self.workloads.cronjobs.count
        ));
        out.push_str(&format!(
            "Networking: {} services, {} ingresses, {} network policies\n",
            self.networking.services.count,
            self.networking.ingresses.count,
            self.networking.network_policies.count
        ));
        out.push_str(&format!(
            "Storage: {} persistent volumes, {} claims, {} storage classes\n",
            self.storage.persistent_volumes.count,
            self.storage.persistent_volume_claims.count,
            self.storage.storage_classes.count
        ));
        out.push_str(&format!(
            "Capacity: {} cores, {} Gi memory, {} pod slots\n",
            u.total_cpu_cores, u.total_memory_gi, u.total_pod_slots
        ));
        out.push_str(&format!(
            "Pod utilization: {}% of allocatable slots\n",
            u.pod_utilization_percent
        ));
        out.push_str(&format!(
            "Coverage: limits {}%, liveness {}%, readiness {}%, HPA {}%, quotas {}%\n",
            m.pods_with_resource_limits_percent,
            m.pods_with_liveness_probe_percent,
            m.pods_with_readiness_probe_percent,
            m.workloads_with_hpa_percent,
            m.namespaces_with_quota_percent
        ));
        out.push_str(&format!(
            "Events: {} total, {} warnings ({} OOM, {} scheduling, {} image pull, {} node)\n",
            e.count,
            e.warnings,
            e.categories.oom_kills,
            e.categories.scheduling_failures,
            e.categories.image_pull_failures,
            e.categories.node_events
        ));
        out
    }
}
