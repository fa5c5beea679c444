use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::AuthToken;

#[derive(Clone)]
pub struct AuthTokenRepository {
    pool: SqlitePool,
}

impl AuthTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AuthToken> {
        let auth_token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (id, user_id, token, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(auth_token)
    }

    /// Delete every token that expired before `now`; returns how many rows
    /// went away.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
