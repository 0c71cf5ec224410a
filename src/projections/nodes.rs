use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::filter_safe_labels;
use crate::types::{NodeRecord, NodeResources};

pub fn project_node(node: &Node) -> Option<NodeRecord> {
    let name = node.metadata.name.clone()?;
    let status = node.status.as_ref();

    Some(NodeRecord {
        name,
        created: node.metadata.creation_timestamp.as_ref().map(|t| t.0),
        labels: filter_safe_labels(node.metadata.labels.as_ref()),
        kubelet_version: status
            .and_then(|s| s.node_info.as_ref())
            .map(|i| i.kubelet_version.clone()),
        os_image: status
            .and_then(|s| s.node_info.as_ref())
            .map(|i| i.os_image.clone()),
        ready: node_ready(node),
        capacity: resources_from(status.and_then(|s| s.capacity.as_ref())),
        allocatable: resources_from(status.and_then(|s| s.allocatable.as_ref())),
    })
}

fn node_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false)
}

fn resources_from(quantities: Option<&BTreeMap<String, Quantity>>) -> NodeResources {
    let get = |key: &str| quantities.and_then(|q| q.get(key)).map(|q| q.0.clone());
    NodeResources {
        cpu: get("cpu"),
        memory: get("memory"),
        pods: get("pods"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{NodeCondition, NodeStatus, NodeSystemInfo};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn node_with_status(status: NodeStatus) -> Node {
        Node {
            metadata: ObjectMeta {
                name: Some("test-node".to_string()),
                ..Default::default()
            },
            status: Some(status),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_node_capacity_and_allocatable() {
        let mut capacity = BTreeMap::new();
        capacity.insert("cpu".to_string(), Quantity("4".to_string()));
        capacity.insert("memory".to_string(), Quantity("8Gi".to_string()));
        capacity.insert("pods".to_string(), Quantity("110".to_string()));

        let mut allocatable = BTreeMap::new();
        allocatable.insert("cpu".to_string(), Quantity("3800m".to_string()));
        allocatable.insert("pods".to_string(), Quantity("100".to_string()));

        let node = node_with_status(NodeStatus {
            capacity: Some(capacity),
            allocatable: Some(allocatable),
            node_info: Some(NodeSystemInfo {
                kubelet_version: "v1.26.3".to_string(),
                os_image: "Ubuntu 22.04.2 LTS".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        });

        let record = project_node(&node).unwrap();
        assert_eq!(record.name, "test-node");
        assert_eq!(record.capacity.cpu.as_deref(), Some("4"));
        assert_eq!(record.capacity.memory.as_deref(), Some("8Gi"));
        assert_eq!(record.capacity.pods.as_deref(), Some("110"));
        assert_eq!(record.allocatable.cpu.as_deref(), Some("3800m"));
        assert_eq!(record.allocatable.memory, None);
        assert_eq!(record.allocatable.pods.as_deref(), Some("100"));
        assert_eq!(record.kubelet_version.as_deref(), Some("v1.26.3"));
        assert_eq!(record.os_image.as_deref(), Some("Ubuntu 22.04.2 LTS"));
        assert!(!record.ready); // no Ready condition present
    }

    #[test]
    fn test_node_ready_condition() {
        let ready_node = node_with_status(NodeStatus {
            conditions: Some(vec![NodeCondition {
                type_: "Ready".to_string(),
                status: "True".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        });
        assert!(project_node(&ready_node).unwrap().ready);

        let unready_node = node_with_status(NodeStatus {
            conditions: Some(vec![NodeCondition {
                type_: "Ready".to_string(),
                status: "False".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        });
        assert!(!project_node(&unready_node).unwrap().ready);
    }

    #[test]
    fn test_project_node_without_name_is_skipped() {
        let node = Node::default();
        assert!(project_node(&node).is_none());
    }
}
