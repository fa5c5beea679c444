use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Persisted domain event. The notification collaborator drains this
/// outbox; the core only records what happened with enough payload to
/// render a message (ids, amounts, dates in `metadata`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub id: Uuid,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub description: String,
    /// JSON object, stored as text.
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}
