use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub cluster_name: Option<String>,
    pub events_limit: usize,
}

/// One projected collection as it appears in the report: the item count plus
/// the reduced records themselves.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    pub count: usize,
    pub details: Vec<T>,
}

impl<T> From<Vec<T>> for Section<T> {
    fn from(details: Vec<T>) -> Self {
        Self {
            count: details.len(),
            details,
        }
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            count: 0,
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    pub server_version: Option<ServerVersion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerVersion {
    pub git_version: String,
    pub major: String,
    pub minor: String,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub labels: BTreeMap<String, String>,
    pub kubelet_version: Option<String>,
    pub os_image: Option<String>,
    pub ready: bool,
    pub capacity: NodeResources,
    pub allocatable: NodeResources,
}

/// Raw quantity strings as reported by the API; unit normalization happens in
/// the derived-metrics pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeResources {
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub pods: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PodRecord {
    pub name: String,
    pub namespace: String,
    pub phase: Option<String>,
    pub node_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub restart_count: i32,
    pub has_resource_requests: bool,
    pub has_resource_limits: bool,
    pub has_liveness_probe: bool,
    pub has_readiness_probe: bool,
}

/// Common projection for pod-template workloads (deployments, statefulsets,
/// daemonsets).
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadRecord {
    pub name: String,
    pub namespace: String,
    pub replicas: Option<i32>,
    pub ready_replicas: Option<i32>,
    pub has_resource_limits: bool,
    pub has_liveness_probe: bool,
    pub has_readiness_probe: bool,
    pub has_topology_spread: bool,
    pub has_affinity: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub name: String,
    pub namespace: String,
    pub completions: Option<i32>,
    pub succeeded: Option<i32>,
    pub failed: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CronJobRecord {
    pub name: String,
    pub namespace: String,
    pub schedule: String,
    pub suspend: bool,
    pub last_schedule_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecord {
    pub name: String,
    pub namespace: String,
    pub service_type: Option<String>,
    pub cluster_ip: Option<String>,
    pub ports: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngressRecord {
    pub name: String,
    pub namespace: String,
    pub class: Option<String>,
    pub hosts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkPolicyRecord {
    pub name: String,
    pub namespace: String,
    pub policy_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersistentVolumeRecord {
    pub name: String,
    pub capacity: Option<String>,
    pub access_modes: Vec<String>,
    pub reclaim_policy: Option<String>,
    pub storage_class: Option<String>,
    pub phase: Option<String>,
    pub claim: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersistentVolumeClaimRecord {
    pub name: String,
    pub namespace: String,
    pub requested_storage: Option<String>,
    pub storage_class: Option<String>,
    pub phase: Option<String>,
    pub volume_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageClassRecord {
    pub name: String,
    pub provisioner: String,
    pub reclaim_policy: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HpaRecord {
    pub name: String,
    pub namespace: String,
    pub target_kind: String,
    pub target_name: String,
    pub min_replicas: Option<i32>,
    pub max_replicas: i32,
    pub current_replicas: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PdbRecord {
    pub name: String,
    pub namespace: String,
    pub min_available: Option<String>,
    pub max_unavailable: Option<String>,
    pub disruptions_allowed: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityClassRecord {
    pub name: String,
    pub value: i32,
    pub global_default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceQuotaRecord {
    pub name: String,
    pub namespace: String,
    pub hard: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitRangeRecord {
    pub name: String,
    pub namespace: String,
    pub limit_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub namespace: Option<String>,
    pub reason: Option<String>,
    pub event_type: Option<String>,
    pub object_kind: Option<String>,
    pub object_name: Option<String>,
    pub message: Option<String>,
    pub count: i32,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Grouped workload sections, written to the report under `workloads`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkloadInventory {
    pub pods: Section<PodRecord>,
    pub deployments: Section<WorkloadRecord>,
    pub statefulsets: Section<WorkloadRecord>,
    pub daemonsets: Section<WorkloadRecord>,
    pub jobs: Section<JobRecord>,
    pub cronjobs: Section<CronJobRecord>,
}

/// Scheduling- and capacity-policy sections, written under `performance_configs`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceInventory {
    pub horizontal_pod_autoscalers: Section<HpaRecord>,
    pub pod_disruption_budgets: Section<PdbRecord>,
    pub priority_classes: Section<PriorityClassRecord>,
    pub resource_quotas: Section<ResourceQuotaRecord>,
    pub limit_ranges: Section<LimitRangeRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkingInventory {
    pub services: Section<ServiceRecord>,
    pub ingresses: Section<IngressRecord>,
    pub network_policies: Section<NetworkPolicyRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageInventory {
    pub persistent_volumes: Section<PersistentVolumeRecord>,
    pub persistent_volume_claims: Section<PersistentVolumeClaimRecord>,
    pub storage_classes: Section<StorageClassRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventInventory {
    pub count: usize,
    pub warnings: usize,
    pub categories: EventCategories,
    pub recent: Vec<EventRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventCategories {
    pub oom_kills: usize,
    pub scheduling_failures: usize,
    pub image_pull_failures: usize,
    pub node_events: usize,
}

/// Capacity sums and the capacity-relative pod utilization ratio, derived
/// from the node and pod sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceUsage {
    pub total_cpu_cores: f64,
    pub total_memory_ki: i64,
    pub total_memory_gi: i64,
    pub total_pod_slots: i64,
    pub allocatable_cpu_cores: f64,
    pub allocatable_memory_ki: i64,
    pub allocatable_pod_slots: i64,
    pub running_pods: usize,
    pub pod_utilization_percent: f64,
}

/// Configuration-coverage percentages derived from the accumulated sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageMetrics {
    pub pods_with_resource_limits_percent: f64,
    pub pods_with_liveness_probe_percent: f64,
    pub pods_with_readiness_probe_percent: f64,
    pub workloads_with_hpa_percent: f64,
    pub workloads_with_topology_spread_percent: f64,
    pub workloads_with_affinity_percent: f64,
    pub namespaces_with_quota_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterSummary {
    pub node_count: usize,
    pub ready_nodes: usize,
    pub total_pods: usize,
    pub running_pods: usize,
    pub pending_pods: usize,
    pub failed_pods: usize,
    pub deployment_count: usize,
    pub statefulset_count: usize,
    pub daemonset_count: usize,
    pub service_count: usize,
    pub persistent_volume_count: usize,
    pub warning_events: usize,
    pub pod_utilization_percent: f64,
    pub hpa_coverage_percent: f64,
}
