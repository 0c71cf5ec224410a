use std::collections::BTreeMap;

pub mod events;
pub mod networking;
pub mod nodes;
pub mod policies;
pub mod storage;
pub mod workloads;

/// Label namespaces considered safe to copy into the report. Anything outside
/// this allowlist (application labels, tenant annotations) is stripped.
pub const SAFE_LABEL_PREFIXES: &[&str] = &[
    "kubernetes.io/",
    "k8s.io/",
    "topology.kubernetes.io/",
    "node-role.kubernetes.io/",
    "node.kubernetes.io/",
    "beta.kubernetes.io/",
];

pub fn filter_safe_labels(labels: Option<&BTreeMap<String, String>>) -> BTreeMap<String, String> {
    let mut filtered = BTreeMap::new();
    if let Some(labels) = labels {
        for (key, value) in labels {
            if SAFE_LABEL_PREFIXES.iter().any(|p| key.starts_with(p)) {
                filtered.insert(key.clone(), value.clone());
            }
        }
    }
    filtered
}
