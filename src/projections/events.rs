use k8s_openapi::api::core::v1::Event;

use crate::types::{EventCategories, EventRecord};

const OOM_REASONS: &[&str] = &["OOMKilling", "OOMKilled", "SystemOOM"];
const SCHEDULING_FAILURE_REASONS: &[&str] = &["FailedScheduling"];
const IMAGE_PULL_REASONS: &[&str] = &["ErrImagePull", "ImagePullBackOff", "ErrImageNeverPull"];

pub fn project_event(event: &Event) -> EventRecord {
    EventRecord {
        namespace: event.metadata.namespace.clone(),
        reason: event.reason.clone(),
        event_type: event.type_.clone(),
        object_kind: event.involved_object.kind.clone(),
        object_name: event.involved_object.name.clone(),
        message: event.message.clone(),
        count: event.count.unwrap_or(1),
        last_seen: event
            .last_timestamp
            .as_ref()
            .map(|t| t.0)
            .or_else(|| event.event_time.as_ref().map(|t| t.0))
            .or_else(|| event.metadata.creation_timestamp.as_ref().map(|t| t.0)),
    }
}

/// Buckets events into the fixed categories tracked by the report. An event
/// can land in more than one bucket (a SystemOOM on a node is both an OOM
/// kill and a node event).
pub fn classify_events(records: &[EventRecord]) -> EventCategories {
    let mut categories = EventCategories::default();

    for record in records {
        let reason = record.reason.as_deref().unwrap_or("");
        let message = record.message.as_deref().unwrap_or("");

        if OOM_REASONS.contains(&reason) || message.contains("OOMKilled") {
            categories.oom_kills += 1;
        }
        if SCHEDULING_FAILURE_REASONS.contains(&reason) {
            categories.scheduling_failures += 1;
        }
        if IMAGE_PULL_REASONS.contains(&reason)
            || (matches!(reason, "Failed" | "BackOff") && message.contains("image"))
        {
            categories.image_pull_failures += 1;
        }
        if record.object_kind.as_deref() == Some("Node") {
            categories.node_events += 1;
        }
    }

    categories
}

/// Keeps the `limit` most recent records, newest first. Records without a
/// timestamp sort last.
pub fn most_recent(mut records: Vec<EventRecord>, limit: usize) -> Vec<EventRecord> {
    records.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    records.truncate(limit);
    records
}
