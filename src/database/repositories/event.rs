use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{CreateEventInput, DomainEvent};

#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, input: CreateEventInput) -> Result<DomainEvent> {
        let metadata = input
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let event = sqlx::query_as::<_, DomainEvent>(
            r#"
            INSERT INTO domain_events (
                id, event_type, entity_type, entity_id, description, metadata,
                created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, event_type, entity_type, entity_id, description,
                      metadata, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.event_type)
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .bind(&input.description)
        .bind(metadata)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_for_entity(
        &self,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<DomainEvent>> {
        let events = sqlx::query_as::<_, DomainEvent>(
            r#"
            SELECT id, event_type, entity_type, entity_id, description,
                   metadata, created_at
            FROM domain_events
            WHERE entity_type = ? AND entity_id = ?
            ORDER BY created_at
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
