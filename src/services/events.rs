use std::collections::HashMap;

use uuid::Uuid;

use crate::database::models::CreateEventInput;
use crate::database::repositories::EventRepository;

pub mod entity {
    pub const WORK_RECORD: &str = "work_record";
    pub const CORRECTION_REQUEST: &str = "correction_request";
    pub const SALARY: &str = "salary";
    pub const PAYMENT: &str = "payment";
}

pub mod event_type {
    pub const CORRECTION_REQUESTED: &str = "correction.requested";
    pub const CORRECTION_APPROVED: &str = "correction.approved";
    pub const CORRECTION_REJECTED: &str = "correction.rejected";
    pub const SALARY_COMPUTED: &str = "salary.computed";
    pub const PAYMENT_COMPLETED: &str = "payment.completed";
    pub const PAYMENT_FAILED: &str = "payment.failed";
}

/// Records domain events into the outbox the notification collaborator
/// drains. Event recording is best-effort: a failed insert is logged and
/// never fails the operation that produced the event.
#[derive(Clone)]
pub struct EventLogger {
    repository: EventRepository,
}

impl EventLogger {
    pub fn new(repository: EventRepository) -> Self {
        Self { repository }
    }

    pub async fn emit(
        &self,
        event_type: &str,
        entity_type: &str,
        entity_id: Uuid,
        description: String,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) {
        let input = CreateEventInput {
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            description,
            metadata,
        };

        if let Err(e) = self.repository.record(input).await {
            log::warn!("Failed to record {} event: {}", event_type, e);
        }
    }

    pub fn metadata(pairs: Vec<(&str, String)>) -> HashMap<String, serde_json::Value> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect()
    }
}
