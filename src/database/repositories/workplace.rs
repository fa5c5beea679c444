use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Workplace, WorkplaceInput};

#[derive(Clone)]
pub struct WorkplaceRepository {
    pool: SqlitePool,
}

impl WorkplaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: WorkplaceInput) -> Result<Workplace> {
        let now = Utc::now();
        let workplace = sqlx::query_as::<_, Workplace>(
            r#"
            INSERT INTO workplaces (
                id, employer_id, name, under_five_employees, weekend_premium,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, employer_id, name, under_five_employees,
                      weekend_premium, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.employer_id)
        .bind(&input.name)
        .bind(input.under_five_employees)
        .bind(input.weekend_premium)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(workplace)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Workplace>> {
        let workplace = sqlx::query_as::<_, Workplace>(
            r#"
            SELECT id, employer_id, name, under_five_employees,
                   weekend_premium, created_at, updated_at
            FROM workplaces WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workplace)
    }
}
