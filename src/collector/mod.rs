use std::fmt::Debug;

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    Event, LimitRange, PersistentVolume, PersistentVolumeClaim, Pod, ResourceQuota, Service,
};
use k8s_openapi::api::networking::v1::{Ingress, NetworkPolicy};
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::api::scheduling::v1::PriorityClass;
use k8s_openapi::api::storage::v1::StorageClass;
use kube::{api::ListParams, Api, Client, Resource};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::projections;
use crate::types::{
    Config, EventInventory, NetworkingInventory, NodeRecord, PerformanceInventory, Section,
    StorageInventory, WorkloadInventory,
};

/// Lists and projects the cluster inventory one resource kind at a time.
pub struct ResourceCollector<'a> {
    client: &'a Client,
    config: &'a Config,
}

impl<'a> ResourceCollector<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    /// Lists a kind cluster-wide (all namespaces for namespaced kinds). Any
    /// listing failure (RBAC denial, kind not installed, API error) is
    /// swallowed: the caller gets an empty collection and the run continues.
    async fn list_or_empty<K>(&self, kind: &str) -> Vec<K>
    where
        K: Resource + Clone + DeserializeOwned + Debug,
        <K as Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::all(self.client.clone());
        match api.list(&ListParams::default()).await {
            Ok(list) => list.items,
            Err(err) => {
                warn!("failed to list {}: {}; recording empty section", kind, err);
                Vec::new()
            }
        }
    }

    pub async fn collect_nodes(&self) -> Section<NodeRecord> {
        let nodes = self.list_or_empty::<k8s_openapi::api::core::v1::Node>("nodes").await;
        nodes
            .iter()
            .filter_map(projections::nodes::project_node)
            .collect::<Vec<_>>()
            .into()
    }

    pub async fn collect_workloads(&self) -> WorkloadInventory {
        let pods = self.list_or_empty::<Pod>("pods").await;
        let deployments = self.list_or_empty::<Deployment>("deployments").await;
        let statefulsets = self.list_or_empty::<StatefulSet>("statefulsets").await;
        let daemonsets = self.list_or_empty::<DaemonSet>("daemonsets").await;
        let jobs = self.list_or_empty::<Job>("jobs").await;
        let cronjobs = self.list_or_empty::<CronJob>("cronjobs").await;

        WorkloadInventory {
            pods: pods
                .iter()
                .filter_map(projections::workloads::project_pod)
                .collect::<Vec<_>>()
                .into(),
            deployments: deployments
                .iter()
                .filter_map(projections::workloads::project_deployment)
                .collect::<Vec<_>>()
                .into(),
            statefulsets: statefulsets
                .iter()
                .filter_map(projections::workloads::project_statefulset)
                .collect::<Vec<_>>()
                .into(),
            daemonsets: daemonsets
                .iter()
                .filter_map(projections::workloads::project_daemonset)
                .collect::<Vec<_>>()
                .into(),
            jobs: jobs
                .iter()
                .filter_map(projections::workloads::project_job)
                .collect::<Vec<_>>()
                .into(),
            cronjobs: cronjobs
                .iter()
                .filter_map(projections::workloads::project_cronjob)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    pub async fn collect_performance_configs(&self) -> PerformanceInventory {
        let hpas = self
            .list_or_empty::<HorizontalPodAutoscaler>("horizontalpodautoscalers")
            .await;
        let pdbs = self
            .list_or_empty::<PodDisruptionBudget>("poddisruptionbudgets")
            .await;
        let priority_classes = self.list_or_empty::<PriorityClass>("priorityclasses").await;
        let quotas = self.list_or_empty::<ResourceQuota>("resourcequotas").await;
        let limit_ranges = self.list_or_empty::<LimitRange>("limitranges").await;

        PerformanceInventory {
            horizontal_pod_autoscalers: hpas
                .iter()
                .filter_map(projections::policies::project_hpa)
                .collect::<Vec<_>>()
                .into(),
            pod_disruption_budgets: pdbs
                .iter()
                .filter_map(projections::policies::project_pdb)
                .collect::<Vec<_>>()
                .into(),
            priority_classes: priority_classes
                .iter()
                .filter_map(projections::policies::project_priority_class)
                .collect::<Vec<_>>()
                .into(),
            resource_quotas: quotas
                .iter()
                .filter_map(projections::policies::project_resource_quota)
                .collect::<Vec<_>>()
                .into(),
            limit_ranges: limit_ranges
                .iter()
                .filter_map(projections::policies::project_limit_range)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    pub async fn collect_networking(&self) -> NetworkingInventory {
        let services = self.list_or_empty::<Service>("services").await;
        let ingresses = self.list_or_empty::<Ingress>("ingresses").await;
        let policies = self.list_or_empty::<NetworkPolicy>("networkpolicies").await;

        NetworkingInventory {
            services: services
                .iter()
                .filter_map(projections::networking::project_service)
                .collect::<Vec<_>>()
                .into(),
            ingresses: ingresses
                .iter()
                .filter_map(projections::networking::project_ingress)
                .collect::<Vec<_>>()
                .into(),
            network_policies: policies
                .iter()
                .filter_map(projections::networking::project_network_policy)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    pub async fn collect_storage(&self) -> StorageInventory {
        let pvs = self.list_or_empty::<PersistentVolume>("persistentvolumes").await;
        let pvcs = self
            .list_or_empty::<PersistentVolumeClaim>("persistentvolumeclaims")
            .await;
        let classes = self.list_or_empty::<StorageClass>("storageclasses").await;

        StorageInventory {
            persistent_volumes: pvs
                .iter()
                .filter_map(projections::storage::project_persistent_volume)
                .collect::<Vec<_>>()
                .into(),
            persistent_volume_claims: pvcs
                .iter()
                .filter_map(projections::storage::project_persistent_volume_claim)
                .collect::<Vec<_>>()
                .into(),
            storage_classes: classes
                .iter()
                .filter_map(projections::storage::project_storage_class)
                .collect::<Vec<_>>()
                .into(),
        }
    }

    pub async fn collect_events(&self) -> EventInventory {
        let events = self.list_or_empty::<Event>("events").await;
        let records: Vec<_> = events.iter().map(projections::events::project_event).collect();

        let warnings = records
            .iter()
            .filter(|r| r.event_type.as_deref() == Some("Warning"))
            .count();
        let categories = projections::events::classify_events(&records);
        let count = records.len();
        let recent = projections::events::most_recent(records, self.config.events_limit);

        EventInventory {
            count,
            warnings,
            categories,
            recent,
        }
    }
}
