use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::Payment;

const PAYMENT_COLUMNS: &str = r#"
    id, salary_id, method, status, completed_at, transaction_ref,
    failure_reason, created_at, updated_at
"#;

/// Pending payment joined with the due date that makes it overdue.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverduePayment {
    #[sqlx(flatten)]
    pub payment: Payment,
    pub payment_due_date: NaiveDate,
}

#[derive(Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn find_by_salary(&self, salary_id: Uuid) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE salary_id = ?"
        ))
        .bind(salary_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Guarded transition to completed. `None` means the row exists but is
    /// no longer pending; the row is untouched in that case.
    pub async fn complete(&self, id: Uuid, transaction_ref: &str) -> Result<Option<Payment>> {
        let now = Utc::now();
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments SET
                status = 'completed', completed_at = ?, transaction_ref = ?,
                updated_at = ?
            WHERE id = ? AND status = 'pending'
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(now)
        .bind(transaction_ref)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Guarded transition to failed, same contract as [`complete`].
    pub async fn fail(&self, id: Uuid, reason: &str) -> Result<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments SET
                status = 'failed', failure_reason = ?, updated_at = ?
            WHERE id = ? AND status = 'pending'
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(reason)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    /// Pending payments whose salary fell due strictly before `as_of`.
    pub async fn find_overdue_pending(&self, as_of: NaiveDate) -> Result<Vec<OverduePayment>> {
        let payments = sqlx::query_as::<_, OverduePayment>(
            r#"
            SELECT p.id, p.salary_id, p.method, p.status, p.completed_at,
                   p.transaction_ref, p.failure_reason, p.created_at, p.updated_at,
                   s.payment_due_date
            FROM payments p
            JOIN salaries s ON s.id = p.salary_id
            WHERE p.status = 'pending' AND s.payment_due_date < ?
            ORDER BY s.payment_due_date
            "#,
        )
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
