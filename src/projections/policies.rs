use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{LimitRange, ResourceQuota};
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::api::scheduling::v1::PriorityClass;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::types::{
    HpaRecord, LimitRangeRecord, PdbRecord, PriorityClassRecord, ResourceQuotaRecord,
};

fn int_or_string(value: &IntOrString) -> String {
    match value {
        IntOrString::Int(i) => i.to_string(),
        IntOrString::String(s) => s.clone(),
    }
}

pub fn project_hpa(hpa: &HorizontalPodAutoscaler) -> Option<HpaRecord> {
    let name = hpa.metadata.name.clone()?;
    let spec = hpa.spec.as_ref()?;

    Some(HpaRecord {
        name,
        namespace: hpa.metadata.namespace.clone().unwrap_or_default(),
        target_kind: spec.scale_target_ref.kind.clone(),
        target_name: spec.scale_target_ref.name.clone(),
        min_replicas: spec.min_replicas,
        max_replicas: spec.max_replicas,
        current_replicas: hpa.status.as_ref().and_then(|s| s.current_replicas),
    })
}

pub fn project_pdb(pdb: &PodDisruptionBudget) -> Option<PdbRecord> {
    let name = pdb.metadata.name.clone()?;
    let spec = pdb.spec.as_ref();

    Some(PdbRecord {
        name,
        namespace: pdb.metadata.namespace.clone().unwrap_or_default(),
        min_available: spec
            .and_then(|s| s.min_available.as_ref())
            .map(int_or_string),
        max_unavailable: spec
            .and_then(|s| s.max_unavailable.as_ref())
            .map(int_or_string),
        disruptions_allowed: pdb.status.as_ref().map(|s| s.disruptions_allowed),
    })
}

pub fn project_priority_class(class: &PriorityClass) -> Option<PriorityClassRecord> {
    Some(PriorityClassRecord {
        name: class.metadata.name.clone()?,
        value: class.value,
        global_default: class.global_default.unwrap_or(false),
    })
}

pub fn project_resource_quota(quota: &ResourceQuota) -> Option<ResourceQuotaRecord> {
    let name = quota.metadata.name.clone()?;

    let hard = quota
        .spec
        .as_ref()
        .and_then(|s| s.hard.as_ref())
        .map(|hard| {
            hard.iter()
                .map(|(k, v)| (k.clone(), v.0.clone()))
                .collect()
        })
        .unwrap_or_default();

    Some(ResourceQuotaRecord {
        name,
        namespace: quota.metadata.namespace.clone().unwrap_or_default(),
        hard,
    })
}

pub fn project_limit_range(range: &LimitRange) -> Option<LimitRangeRecord> {
    let name = range.metadata.name.clone()?;

    Some(LimitRangeRecord {
        name,
        namespace: range.metadata.namespace.clone().unwrap_or_default(),
        limit_types: range
            .spec
            .as_ref()
            .map(|s| s.limits.iter().map(|l| l.type_.clone()).collect())
            .unwrap_or_default(),
    })
}
