use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{WorkRecord, WorkRecordInput, WorkRecordStatus};
use crate::database::utils::month_bounds;

const RECORD_COLUMNS: &str = r#"
    id, contract_id, work_date, start_time, end_time, status,
    created_at, updated_at
"#;

#[derive(Clone)]
pub struct WorkRecordRepository {
    pool: SqlitePool,
}

impl WorkRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: WorkRecordInput,
        status: WorkRecordStatus,
    ) -> Result<WorkRecord> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, WorkRecord>(&format!(
            r#"
            INSERT INTO work_records (
                id, contract_id, work_date, start_time, end_time, status,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.contract_id)
        .bind(input.work_date)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkRecord>> {
        let record = sqlx::query_as::<_, WorkRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM work_records WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Records of the month that count toward wages: scheduled and
    /// completed, never soft-deleted ones.
    pub async fn find_payable_for_month(
        &self,
        contract_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<WorkRecord>> {
        let (first, next) = month_bounds(year, month)?;
        let records = sqlx::query_as::<_, WorkRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM work_records
            WHERE contract_id = ?
              AND work_date >= ? AND work_date < ?
              AND status IN ('scheduled', 'completed')
            ORDER BY work_date, start_time
            "#
        ))
        .bind(contract_id)
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Every date of the month that already has a record for the contract,
    /// regardless of status. Soft-deleted rows still claim their date so
    /// the generator does not resurrect deliberate deletions.
    pub async fn occupied_dates_for_month(
        &self,
        contract_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<NaiveDate>> {
        let (first, next) = month_bounds(year, month)?;
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT work_date
            FROM work_records
            WHERE contract_id = ? AND work_date >= ? AND work_date < ?
            "#,
        )
        .bind(contract_id)
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: WorkRecordStatus,
    ) -> Result<Option<WorkRecord>> {
        let record = sqlx::query_as::<_, WorkRecord>(&format!(
            r#"
            UPDATE work_records SET status = ?, updated_at = ?
            WHERE id = ?
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
