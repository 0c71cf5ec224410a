use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::{Ingress, NetworkPolicy};

use crate::types::{IngressRecord, NetworkPolicyRecord, ServiceRecord};

pub fn project_service(service: &Service) -> Option<ServiceRecord> {
    let name = service.metadata.name.clone()?;
    let spec = service.spec.as_ref();

    Some(ServiceRecord {
        name,
        namespace: service.metadata.namespace.clone().unwrap_or_default(),
        service_type: spec.and_then(|s| s.type_.clone()),
        cluster_ip: spec.and_then(|s| s.cluster_ip.clone()),
        ports: spec
            .and_then(|s| s.ports.as_ref())
            .map(|ports| ports.iter().map(|p| p.port).collect())
            .unwrap_or_default(),
    })
}

pub fn project_ingress(ingress: &Ingress) -> Option<IngressRecord> {
    let name = ingress.metadata.name.clone()?;
    let spec = ingress.spec.as_ref();

    Some(IngressRecord {
        name,
        namespace: ingress.metadata.namespace.clone().unwrap_or_default(),
        class: spec.and_then(|s| s.ingress_class_name.clone()),
        hosts: spec
            .and_then(|s| s.rules.as_ref())
            .map(|rules| rules.iter().filter_map(|r| r.host.clone()).collect())
            .unwrap_or_default(),
    })
}

pub fn project_network_policy(policy: &NetworkPolicy) -> Option<NetworkPolicyRecord> {
    let name = policy.metadata.name.clone()?;

    Some(NetworkPolicyRecord {
        name,
        namespace: policy.metadata.namespace.clone().unwrap_or_default(),
        policy_types: policy
            .spec
            .as_ref()
            .and_then(|s| s.policy_types.clone())
            .unwrap_or_default(),
    })
}
