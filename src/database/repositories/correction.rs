use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{
    CorrectionDecision, CorrectionRequest, CorrectionRequestInput, CorrectionStatus,
};

const REQUEST_COLUMNS: &str = r#"
    id, work_record_id, requested_by, proposed_date, proposed_start_time,
    proposed_end_time, reason, status, reviewed_by, reviewed_at,
    review_comment, created_at, updated_at
"#;

#[derive(Clone)]
pub struct CorrectionRepository {
    pool: SqlitePool,
}

impl CorrectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CorrectionRequestInput) -> Result<CorrectionRequest> {
        let now = Utc::now();
        let request = sqlx::query_as::<_, CorrectionRequest>(&format!(
            r#"
            INSERT INTO correction_requests (
                id, work_record_id, requested_by, proposed_date,
                proposed_start_time, proposed_end_time, reason, status,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.work_record_id)
        .bind(input.requested_by)
        .bind(input.proposed_date)
        .bind(input.proposed_start_time)
        .bind(input.proposed_end_time)
        .bind(&input.reason)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CorrectionRequest>> {
        let request = sqlx::query_as::<_, CorrectionRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM correction_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_for_record(&self, work_record_id: Uuid) -> Result<Vec<CorrectionRequest>> {
        let requests = sqlx::query_as::<_, CorrectionRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM correction_requests
            WHERE work_record_id = ?
            ORDER BY created_at DESC
            "#
        ))
        .bind(work_record_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Resolve a pending request. The status stamp and, on approval, the
    /// work record rewrite commit together or not at all. Returns `None`
    /// when the request was not pending anymore; nothing is mutated then.
    pub async fn resolve(
        &self,
        id: Uuid,
        decision: CorrectionDecision,
        reviewed_by: Uuid,
        review_comment: Option<String>,
    ) -> Result<Option<CorrectionRequest>> {
        let now = Utc::now();
        let status = match decision {
            CorrectionDecision::Approve => CorrectionStatus::Approved,
            CorrectionDecision::Reject => CorrectionStatus::Rejected,
        };

        let mut tx = self.pool.begin().await?;

        // Guarded stamp first: a request resolved by anyone else since we
        // loaded it leaves zero rows here and the transaction is dropped.
        let resolved = sqlx::query_as::<_, CorrectionRequest>(&format!(
            r#"
            UPDATE correction_requests SET
                status = ?, reviewed_by = ?, reviewed_at = ?, review_comment = ?,
                updated_at = ?
            WHERE id = ? AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(reviewed_by)
        .bind(now)
        .bind(review_comment)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(resolved) = resolved else {
            return Ok(None);
        };

        if decision == CorrectionDecision::Approve {
            sqlx::query(
                r#"
                UPDATE work_records SET
                    work_date = ?, start_time = ?, end_time = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(resolved.proposed_date)
            .bind(resolved.proposed_start_time)
            .bind(resolved.proposed_end_time)
            .bind(now)
            .bind(resolved.work_record_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(resolved))
    }
}
