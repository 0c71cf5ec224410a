use k8s_openapi::api::core::v1::{PersistentVolume, PersistentVolumeClaim};
use k8s_openapi::api::storage::v1::StorageClass;

use crate::types::{PersistentVolumeClaimRecord, PersistentVolumeRecord, StorageClassRecord};

const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

pub fn project_persistent_volume(pv: &PersistentVolume) -> Option<PersistentVolumeRecord> {
    let name = pv.metadata.name.clone()?;
    let spec = pv.spec.as_ref();

    Some(PersistentVolumeRecord {
        name,
        capacity: spec
            .and_then(|s| s.capacity.as_ref())
            .and_then(|c| c.get("storage"))
            .map(|q| q.0.clone()),
        access_modes: spec.and_then(|s| s.access_modes.clone()).unwrap_or_default(),
        reclaim_policy: spec.and_then(|s| s.persistent_volume_reclaim_policy.clone()),
        storage_class: spec.and_then(|s| s.storage_class_name.clone()),
        phase: pv.status.as_ref().and_then(|s| s.phase.clone()),
        claim: spec
            .and_then(|s| s.claim_ref.as_ref())
            .and_then(|r| r.name.clone()),
    })
}

pub fn project_persistent_volume_claim(
    pvc: &PersistentVolumeClaim,
) -> Option<PersistentVolumeClaimRecord> {
    let name = pvc.metadata.name.clone()?;
    let spec = pvc.spec.as_ref();

    Some(PersistentVolumeClaimRecord {
        name,
        namespace: pvc.metadata.namespace.clone().unwrap_or_default(),
        requested_storage: spec
            .and_then(|s| s.resources.as_ref())
            .and_then(|r| r.requests.as_ref())
            .and_then(|r| r.get("storage"))
            .map(|q| q.0.clone()),
        storage_class: spec.and_then(|s| s.storage_class_name.clone()),
        phase: pvc.status.as_ref().and_then(|s| s.phase.clone()),
        volume_name: spec.and_then(|s| s.volume_name.clone()),
    })
}

pub fn project_storage_class(class: &StorageClass) -> Option<StorageClassRecord> {
    let name = class.metadata.name.clone()?;

    let is_default = class
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(DEFAULT_CLASS_ANNOTATION))
        .map(|v| v == "true")
        .unwrap_or(false);

    Some(StorageClassRecord {
        name,
        provisioner: class.provisioner.clone(),
        reclaim_policy: class.reclaim_policy.clone(),
        is_default,
    })
}
