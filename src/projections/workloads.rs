use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{Pod, PodSpec};

use crate::types::{CronJobRecord, JobRecord, PodRecord, WorkloadRecord};

/// Configuration predicates extracted from a pod spec; everything else in the
/// spec (env, volumes, images) stays out of the report.
#[derive(Debug, Default)]
struct PodSpecFlags {
    has_resource_requests: bool,
    has_resource_limits: bool,
    has_liveness_probe: bool,
    has_readiness_probe: bool,
    has_topology_spread: bool,
    has_affinity: bool,
}

fn pod_spec_flags(spec: Option<&PodSpec>) -> PodSpecFlags {
    let mut flags = PodSpecFlags::default();
    let Some(spec) = spec else {
        return flags;
    };

    for container in &spec.containers {
        if let Some(resources) = container.resources.as_ref() {
            if resources.requests.as_ref().map(|r| !r.is_empty()).unwrap_or(false) {
                flags.has_resource_requests = true;
            }
            if resources.limits.as_ref().map(|l| !l.is_empty()).unwrap_or(false) {
                flags.has_resource_limits = true;
            }
        }
        if container.liveness_probe.is_some() {
            flags.has_liveness_probe = true;
        }
        if container.readiness_probe.is_some() {
            flags.has_readiness_probe = true;
        }
    }

    flags.has_topology_spread = spec
        .topology_spread_constraints
        .as_ref()
        .map(|c| !c.is_empty())
        .unwrap_or(false);
    flags.has_affinity = spec.affinity.is_some();

    flags
}

pub fn project_pod(pod: &Pod) -> Option<PodRecord> {
    let name = pod.metadata.name.clone()?;
    let namespace = pod.metadata.namespace.clone().unwrap_or_default();
    let flags = pod_spec_flags(pod.spec.as_ref());

    let restart_count = pod
        .status
        .as_ref()
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().map(|cs| cs.restart_count).sum())
        .unwrap_or(0);

    Some(PodRecord {
        name,
        namespace,
        phase: pod.status.as_ref().and_then(|s| s.phase.clone()),
        node_name: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
        created: pod.metadata.creation_timestamp.as_ref().map(|t| t.0),
        restart_count,
        has_resource_requests: flags.has_resource_requests,
        has_resource_limits: flags.has_resource_limits,
        has_liveness_probe: flags.has_liveness_probe,
        has_readiness_probe: flags.has_readiness_probe,
    })
}

fn workload_record(
    name: Option<&String>,
    namespace: Option<&String>,
    replicas: Option<i32>,
    ready_replicas: Option<i32>,
    template_spec: Option<&PodSpec>,
) -> Option<WorkloadRecord> {
    let flags = pod_spec_flags(template_spec);
    Some(WorkloadRecord {
        name: name.cloned()?,
        namespace: namespace.cloned().unwrap_or_default(),
        replicas,
        ready_replicas,
        has_resource_limits: flags.has_resource_limits,
        has_liveness_probe: flags.has_liveness_probe,
        has_readiness_probe: flags.has_readiness_probe,
        has_topology_spread: flags.has_topology_spread,
        has_affinity: flags.has_affinity,
    })
}

pub fn project_deployment(deployment: &Deployment) -> Option<WorkloadRecord> {
    workload_record(
        deployment.metadata.name.as_ref(),
        deployment.metadata.namespace.as_ref(),
        deployment.spec.as_ref().and_then(|s| s.replicas),
        deployment.status.as_ref().and_then(|s| s.ready_replicas),
        deployment.spec.as_ref().and_then(|s| s.template.spec.as_ref()),
    )
}

pub fn project_statefulset(statefulset: &StatefulSet) -> Option<WorkloadRecord> {
    workload_record(
        statefulset.metadata.name.as_ref(),
        statefulset.metadata.namespace.as_ref(),
        statefulset.spec.as_ref().and_then(|s| s.replicas),
        statefulset.status.as_ref().and_then(|s| s.ready_replicas),
        statefulset.spec.as_ref().and_then(|s| s.template.spec.as_ref()),
    )
}

pub fn project_daemonset(daemonset: &DaemonSet) -> Option<WorkloadRecord> {
    workload_record(
        daemonset.metadata.name.as_ref(),
        daemonset.metadata.namespace.as_ref(),
        daemonset.status.as_ref().map(|s| s.desired_number_scheduled),
        daemonset.status.as_ref().map(|s| s.number_ready),
        daemonset.spec.as_ref().and_then(|s| s.template.spec.as_ref()),
    )
}

pub fn project_job(job: &Job) -> Option<JobRecord> {
    let name = job.metadata.name.clone()?;
    let status = job.status.as_ref();

    Some(JobRecord {
        name,
        namespace: job.metadata.namespace.clone().unwrap_or_default(),
        completions: job.spec.as_ref().and_then(|s| s.completions),
        succeeded: status.and_then(|s| s.succeeded),
        failed: status.and_then(|s| s.failed),
        start_time: status.and_then(|s| s.start_time.as_ref()).map(|t| t.0),
        completion_time: status.and_then(|s| s.completion_time.as_ref()).map(|t| t.0),
    })
}

pub fn project_cronjob(cronjob: &CronJob) -> Option<CronJobRecord> {
    let name = cronjob.metadata.name.clone()?;
    let spec = cronjob.spec.as_ref();

    Some(CronJobRecord {
        name,
        namespace: cronjob.metadata.namespace.clone().unwrap_or_default(),
        schedule: spec.map(|s| s.schedule.clone()).unwrap_or_default(),
        suspend: spec.and_then(|s| s.suspend).unwrap_or(false),
        last_schedule_time: cronjob
            .status
            .as_ref()
            .and_then(|s| s.last_schedule_time.as_ref())
            .map(|t| t.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::{DeploymentSpec, DeploymentStatus};
    use k8s_openapi::api::core::v1::{
        Affinity, Container, ContainerStatus, PodStatus, PodTemplateSpec, Probe,
        ResourceRequirements, TopologySpreadConstraint,
    };
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn named_meta(name: &str, namespace: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    fn container_with_limits() -> Container {
        let mut limits = BTreeMap::new();
        limits.insert("cpu".to_string(), Quantity("500m".to_string()));
        Container {
            name: "app".to_string(),
            resources: Some(ResourceRequirements {
                limits: Some(limits),
                ..Default::default()
            }),
            liveness_probe: Some(Probe::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_pod_flags_and_restarts() {
        let pod = Pod {
            metadata: named_meta("api-1", "prod"),
            spec: Some(PodSpec {
                containers: vec![container_with_limits()],
                node_name: Some("node-a".to_string()),
                ..Default::default()
            }),
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                container_statuses: Some(vec![
                    ContainerStatus {
                        restart_count: 2,
                        ..Default::default()
                    },
                    ContainerStatus {
                        restart_count: 1,
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            }),
        };

        let record = project_pod(&pod).unwrap();
        assert_eq!(record.name, "api-1");
        assert_eq!(record.namespace, "prod");
        assert_eq!(record.phase.as_deref(), Some("Running"));
        assert_eq!(record.node_name.as_deref(), Some("node-a"));
        assert_eq!(record.restart_count, 3);
        assert!(record.has_resource_limits);
        assert!(!record.has_resource_requests);
        assert!(record.has_liveness_probe);
        assert!(!record.has_readiness_probe);
    }

    #[test]
    fn test_project_pod_without_spec() {
        let pod = Pod {
            metadata: named_meta("bare", "default"),
            ..Default::default()
        };
        let record = project_pod(&pod).unwrap();
        assert!(!record.has_resource_limits);
        assert_eq!(record.restart_count, 0);
        assert_eq!(record.phase, None);
    }

    #[test]
    fn test_project_deployment_template_flags() {
        let deployment = Deployment {
            metadata: named_meta("web", "prod"),
            spec: Some(DeploymentSpec {
                replicas: Some(3),
                template: PodTemplateSpec {
                    spec: Some(PodSpec {
                        containers: vec![container_with_limits()],
                        topology_spread_constraints: Some(vec![TopologySpreadConstraint::default()]),
                        affinity: Some(Affinity::default()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            }),
            status: Some(DeploymentStatus {
                ready_replicas: Some(2),
                ..Default::default()
            }),
        };

        let record = project_deployment(&deployment).unwrap();
        assert_eq!(record.replicas, Some(3));
        assert_eq!(record.ready_replicas, Some(2));
        assert!(record.has_resource_limits);
        assert!(record.has_topology_spread);
        assert!(record.has_affinity);
        assert!(!record.has_readiness_probe);
    }

    #[test]
    fn test_project_cronjob_defaults() {
        let cronjob = CronJob {
            metadata: named_meta("nightly", "batch"),
            ..Default::default()
        };
        let record = project_cronjob(&cronjob).unwrap();
        assert_eq!(record.schedule, "");
        assert!(!record.suspend);
        assert_eq!(record.last_schedule_time, None);
    }
}
