use std::collections::BTreeMap;
use std::path::PathBuf;

use kube_inventory_reporter::report::InventoryReport;
use kube_inventory_reporter::{
    filter_safe_labels, ki_to_gi_rounded, load_config_with_env, millicores_to_cores,
    parse_cpu_to_millicores, parse_memory_to_ki, percentage, ClusterInfo, Config, MockEnvironment,
    NodeRecord, NodeResources, PodRecord, Section, WorkloadInventory,
};

fn test_config() -> Config {
    Config {
        output_dir: PathBuf::from("."),
        cluster_name: None,
        events_limit: 50,
    }
}

fn node(name: &str, cpu: &str, memory: &str, pods: &str) -> NodeRecord {
    let resources = NodeResources {
        cpu: Some(cpu.to_string()),
        memory: Some(memory.to_string()),
        pods: Some(pods.to_string()),
    };
    NodeRecord {
        name: name.to_string(),
        created: None,
        labels: BTreeMap::new(),
        kubelet_version: Some("v1.26.3".to_string()),
        os_image: None,
        ready: true,
        capacity: resources.clone(),
        allocatable: resources,
    }
}

fn pod(name: &str, phase: &str) -> PodRecord {
    PodRecord {
        name: name.to_string(),
        namespace: "default".to_string(),
        phase: Some(phase.to_string()),
        node_name: None,
        created: None,
        restart_count: 0,
        has_resource_requests: false,
        has_resource_limits: false,
        has_liveness_probe: false,
        has_readiness_probe: false,
    }
}

#[test]
fn test_cpu_parsing_edge_cases() {
    assert_eq!(parse_cpu_to_millicores("0"), Some(0));
    assert_eq!(parse_cpu_to_millicores("0.001"), Some(1));
    assert_eq!(parse_cpu_to_millicores("10.5"), Some(10500));

    // Test with whitespace
    assert_eq!(parse_cpu_to_millicores("  100m  "), Some(100));
    assert_eq!(parse_cpu_to_millicores("\t1\n"), Some(1000));

    // Test extreme values
    assert_eq!(parse_cpu_to_millicores("999999999n"), Some(999));
    assert_eq!(parse_cpu_to_millicores("1000000u"), Some(1000));
}

#[test]
fn test_memory_parsing_edge_cases() {
    assert_eq!(parse_memory_to_ki("0"), Some(0));
    assert_eq!(parse_memory_to_ki("1024"), Some(1));

    // Test with whitespace
    assert_eq!(parse_memory_to_ki("  1Mi  "), Some(1024));
    assert_eq!(parse_memory_to_ki("\t1Gi\n"), Some(1024 * 1024));

    // Binary vs decimal priority (Ki binary, K decimal)
    assert_eq!(parse_memory_to_ki("1000Ki"), Some(1000));
    assert_eq!(parse_memory_to_ki("1024K"), Some(1000));
}

#[test]
fn test_percentage_never_nan() {
    let pct = percentage(5.0, 0.0);
    assert_eq!(pct, 0.0);
    assert!(pct.is_finite());
    assert!(!percentage(0.0, 0.0).is_nan());
}

#[test]
fn test_label_allowlist_end_to_end() {
    let mut labels = BTreeMap::new();
    labels.insert("kubernetes.io/hostname".to_string(), "foo".to_string());
    labels.insert("my-app/custom".to_string(), "bar".to_string());

    let filtered = filter_safe_labels(Some(&labels));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.get("kubernetes.io/hostname").map(String::as_str), Some("foo"));
}

#[test]
fn test_config_environment_isolation() {
    // all variables optional; empty environment yields defaults
    let config = load_config_with_env(&MockEnvironment::new()).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.events_limit, 50);

    let config = load_config_with_env(
        &MockEnvironment::new()
            .with_var("OUTPUT_DIR", "/tmp/reports")
            .with_var("EVENTS_LIMIT", "10"),
    )
    .unwrap();
    assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
    assert_eq!(config.events_limit, 10);
}

#[test]
fn test_report_end_to_end_summary() {
    // 3 nodes, 10 pods (8 Running, 2 Pending), no autoscalers
    let nodes: Section<NodeRecord> = vec![
        node("node-1", "4", "8Gi", "110"),
        node("node-2", "4", "8Gi", "110"),
        node("node-3", "2", "4Gi", "110"),
    ]
    .into();

    let mut pods: Vec<PodRecord> = (0..8).map(|i| pod(&format!("run-{i}"), "Running")).collect();
    pods.push(pod("pend-0", "Pending"));
    pods.push(pod("pend-1", "Pending"));

    let mut workloads = WorkloadInventory::default();
    workloads.pods = pods.into();

    let mut report = InventoryReport::new(test_config(), ClusterInfo::default());
    report.set_nodes(nodes);
    report.set_workloads(workloads);
    let doc = report.finalize();

    assert_eq!(doc.cluster_summary.node_count, 3);
    assert_eq!(doc.cluster_summary.total_pods, 10);
    assert_eq!(doc.cluster_summary.running_pods, 8);
    assert_eq!(doc.cluster_summary.pending_pods, 2);
    assert_eq!(doc.cluster_summary.hpa_coverage_percent, 0.0);

    // 330 allocatable slots, 8 running: 2.4% after rounding
    assert_eq!(doc.resource_usage.allocatable_pod_slots, 330);
    assert_eq!(doc.resource_usage.pod_utilization_percent, 2.4);
}

#[test]
fn test_failed_fetches_still_produce_valid_document() {
    // A run where every listing failed leaves each section at count 0 with
    // empty details but the document remains complete.
    let doc = InventoryReport::new(test_config(), ClusterInfo::default()).finalize();

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["nodes"]["count"], 0);
    assert_eq!(json["nodes"]["details"].as_array().unwrap().len(), 0);
    assert_eq!(json["workloads"]["pods"]["count"], 0);
    assert_eq!(json["storage"]["persistent_volumes"]["count"], 0);
    assert_eq!(json["cluster_events"]["count"], 0);
    assert_eq!(json["cluster_summary"]["total_pods"], 0);
    assert_eq!(json["resource_usage"]["pod_utilization_percent"], 0.0);
}

#[test]
fn test_document_fixed_key_set() {
    let doc = InventoryReport::new(test_config(), ClusterInfo::default()).finalize();
    let json = serde_json::to_value(&doc).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

    for expected in [
        "collection_timestamp",
        "cluster_info",
        "nodes",
        "workloads",
        "performance_configs",
        "cluster_events",
        "networking",
        "storage",
        "metrics",
        "resource_usage",
        "cluster_summary",
    ] {
        assert!(keys.contains(&expected), "missing key {}", expected);
    }
    assert_eq!(keys.len(), 11);
}

#[test]
fn test_report_file_written_with_timestamped_name() {
    let dir = tempfile::tempdir().unwrap();
    let doc = InventoryReport::new(test_config(), ClusterInfo::default()).finalize();

    let path = doc.write_to(dir.path()).unwrap();
    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("cluster-report-"));
    assert!(file_name.ends_with(".json"));

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(parsed["collection_timestamp"].is_string());
}

#[test]
fn test_memory_aggregation_units() {
    // "1000Ki" + "2000Ki" totals 3000 Ki; Gi is round(3000/1024/1024)
    let total = parse_memory_to_ki("1000Ki").unwrap() + parse_memory_to_ki("2000Ki").unwrap();
    assert_eq!(total, 3000);
    assert_eq!(ki_to_gi_rounded(total), 0);

    // "2" + "500m" cpu totals 2.5 cores
    let cores = millicores_to_cores(
        parse_cpu_to_millicores("2").unwrap() + parse_cpu_to_millicores("500m").unwrap(),
    );
    assert_eq!(cores, 2.5);
}
