use std::collections::BTreeSet;

use crate::parsing::{
    ki_to_gi_rounded, millicores_to_cores, parse_cpu_to_millicores, parse_memory_to_ki,
    percentage,
};
use crate::types::{
    ClusterSummary, CoverageMetrics, EventInventory, NetworkingInventory, NodeRecord,
    NodeResources, PerformanceInventory, PodRecord, Section, StorageInventory, WorkloadInventory,
    WorkloadRecord, ResourceUsage,
};

#[derive(Debug, Default)]
struct CapacityTotals {
    cpu_millicores: i64,
    memory_ki: i64,
    pod_slots: i64,
}

fn sum_node_resources<'a, I>(resources: I) -> CapacityTotals
where
    I: Iterator<Item = &'a NodeResources>,
{
    let mut totals = CapacityTotals::default();
    for r in resources {
        if let Some(mc) = r.cpu.as_deref().and_then(parse_cpu_to_millicores) {
            totals.cpu_millicores += mc;
        }
        if let Some(ki) = r.memory.as_deref().and_then(parse_memory_to_ki) {
            totals.memory_ki += ki;
        }
        if let Some(slots) = r.pods.as_deref().and_then(|p| p.trim().parse::<i64>().ok()) {
            totals.pod_slots += slots;
        }
    }
    totals
}

fn count_phase(pods: &Section<PodRecord>, phase: &str) -> usize {
    pods.details
        .iter()
        .filter(|p| p.phase.as_deref() == Some(phase))
        .count()
}

/// Capacity sums over the node section plus the capacity-relative pod
/// utilization ratio (running pods over allocatable pod slots, as the
/// original report defines it).
pub fn compute_resource_usage(
    nodes: &Section<NodeRecord>,
    pods: &Section<PodRecord>,
) -> ResourceUsage {
    let capacity = sum_node_resources(nodes.details.iter().map(|n| &n.capacity));
    let allocatable = sum_node_resources(nodes.details.iter().map(|n| &n.allocatable));
    let running_pods = count_phase(pods, "Running");

    ResourceUsage {
        total_cpu_cores: millicores_to_cores(capacity.cpu_millicores),
        total_memory_ki: capacity.memory_ki,
        total_memory_gi: ki_to_gi_rounded(capacity.memory_ki),
        total_pod_slots: capacity.pod_slots,
        allocatable_cpu_cores: millicores_to_cores(allocatable.cpu_millicores),
        allocatable_memory_ki: allocatable.memory_ki,
        allocatable_pod_slots: allocatable.pod_slots,
        running_pods,
        pod_utilization_percent: percentage(running_pods as f64, allocatable.pod_slots as f64),
    }
}

fn has_matching_hpa(workload: &WorkloadRecord, kind: &str, performance: &PerformanceInventory) -> bool {
    performance
        .horizontal_pod_autoscalers
        .details
        .iter()
        .any(|hpa| {
            hpa.namespace == workload.namespace
                && hpa.target_kind == kind
                && hpa.target_name == workload.name
        })
}

pub fn compute_coverage_metrics(
    workloads: &WorkloadInventory,
    performance: &PerformanceInventory,
) -> CoverageMetrics {
    let pods = &workloads.pods;
    let pod_total = pods.count as f64;

    let with_limits = pods.details.iter().filter(|p| p.has_resource_limits).count();
    let with_liveness = pods.details.iter().filter(|p| p.has_liveness_probe).count();
    let with_readiness = pods.details.iter().filter(|p| p.has_readiness_probe).count();

    // HPAs can only target scalable workloads, so daemonsets stay out of the
    // autoscaler denominator.
    let scalable: Vec<(&WorkloadRecord, &str)> = workloads
        .deployments
        .details
        .iter()
        .map(|w| (w, "Deployment"))
        .chain(
            workloads
                .statefulsets
                .details
                .iter()
                .map(|w| (w, "StatefulSet")),
        )
        .collect();
    let with_hpa = scalable
        .iter()
        .filter(|(w, kind)| has_matching_hpa(w, kind, performance))
        .count();

    let all_workloads: Vec<&WorkloadRecord> = workloads
        .deployments
        .details
        .iter()
        .chain(workloads.statefulsets.details.iter())
        .chain(workloads.daemonsets.details.iter())
        .collect();
    let with_spread = all_workloads.iter().filter(|w| w.has_topology_spread).count();
    let with_affinity = all_workloads.iter().filter(|w| w.has_affinity).count();

    let pod_namespaces: BTreeSet<&str> = pods
        .details
        .iter()
        .map(|p| p.namespace.as_str())
        .collect();
    let quota_namespaces: BTreeSet<&str> = performance
        .resource_quotas
        .details
        .iter()
        .map(|q| q.namespace.as_str())
        .collect();
    let covered_namespaces = pod_namespaces
        .iter()
        .filter(|ns| quota_namespaces.contains(*ns))
        .count();

    CoverageMetrics {
        pods_with_resource_limits_percent: percentage(with_limits as f64, pod_total),
        pods_with_liveness_probe_percent: percentage(with_liveness as f64, pod_total),
        pods_with_readiness_probe_percent: percentage(with_readiness as f64, pod_total),
        workloads_with_hpa_percent: percentage(with_hpa as f64, scalable.len() as f64),
        workloads_with_topology_spread_percent: percentage(
            with_spread as f64,
            all_workloads.len() as f64,
        ),
        workloads_with_affinity_percent: percentage(
            with_affinity as f64,
            all_workloads.len() as f64,
        ),
        namespaces_with_quota_percent: percentage(
            covered_namespaces as f64,
            pod_namespaces.len() as f64,
        ),
    }
}

pub fn compute_cluster_summary(
    nodes: &Section<NodeRecord>,
    workloads: &WorkloadInventory,
    networking: &NetworkingInventory,
    storage: &StorageInventory,
    events: &EventInventory,
    usage: &ResourceUsage,
    coverage: &CoverageMetrics,
) -> ClusterSummary {
    ClusterSummary {
        node_count: nodes.count,
        ready_nodes: nodes.details.iter().filter(|n| n.ready).count(),
        total_pods: workloads.pods.count,
        running_pods: count_phase(&workloads.pods, "Running"),
        pending_pods: count_phase(&workloads.pods, "Pending"),
        failed_pods: count_phase(&workloads.pods, "Failed"),
        deployment_count: workloads.deployments.count,
        statefulset_count: workloads.statefulsets.count,
        daemonset_count: workloads.daemonsets.count,
        service_count: networking.services.count,
        persistent_volume_count: storage.persistent_volumes.count,
        warning_events: events.warnings,
        pod_utilization_percent: usage.pod_utilization_percent,
        hpa_coverage_percent: coverage.workloads_with_hpa_percent,
    }
}
