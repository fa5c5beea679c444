use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Payment, PaymentMethod, PaymentStatus, Salary, SalaryInput};

const SALARY_COLUMNS: &str = r#"
    id, contract_id, year, month, total_minutes, total_hours, base_pay,
    overtime_pay, night_pay, holiday_pay, gross_pay, national_pension,
    health_insurance, long_term_care, employment_insurance, income_tax,
    local_income_tax, total_deduction, net_pay, payment_due_date,
    created_at, updated_at
"#;

const PAYMENT_COLUMNS: &str = r#"
    id, salary_id, method, status, completed_at, transaction_ref,
    failure_reason, created_at, updated_at
"#;

#[derive(Clone)]
pub struct SalaryRepository {
    pool: SqlitePool,
}

impl SalaryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Salary>> {
        let salary = sqlx::query_as::<_, Salary>(&format!(
            "SELECT {SALARY_COLUMNS} FROM salaries WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salary)
    }

    pub async fn find_for_month(
        &self,
        contract_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Option<Salary>> {
        let salary = sqlx::query_as::<_, Salary>(&format!(
            r#"
            SELECT {SALARY_COLUMNS}
            FROM salaries
            WHERE contract_id = ? AND year = ? AND month = ?
            "#
        ))
        .bind(contract_id)
        .bind(year)
        .bind(month as i32)
        .fetch_optional(&self.pool)
        .await?;

        Ok(salary)
    }

    /// Replace the statement for `(contract, year, month)` and create its
    /// fresh pending payment, all in one transaction. Returns `None`
    /// without mutating anything when the existing payment is already
    /// terminal: a settled month is closed to recomputation.
    pub async fn replace_for_month(
        &self,
        input: SalaryInput,
        method: PaymentMethod,
    ) -> Result<Option<(Salary, Payment)>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let existing_status = sqlx::query_scalar::<_, PaymentStatus>(
            r#"
            SELECT p.status
            FROM payments p
            JOIN salaries s ON s.id = p.salary_id
            WHERE s.contract_id = ? AND s.year = ? AND s.month = ?
            "#,
        )
        .bind(input.contract_id)
        .bind(input.year)
        .bind(input.month)
        .fetch_optional(&mut *tx)
        .await?;

        if matches!(
            existing_status,
            Some(PaymentStatus::Completed) | Some(PaymentStatus::Failed)
        ) {
            return Ok(None);
        }

        sqlx::query(
            r#"
            DELETE FROM payments
            WHERE salary_id IN (
                SELECT id FROM salaries WHERE contract_id = ? AND year = ? AND month = ?
            )
            "#,
        )
        .bind(input.contract_id)
        .bind(input.year)
        .bind(input.month)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM salaries WHERE contract_id = ? AND year = ? AND month = ?")
            .bind(input.contract_id)
            .bind(input.year)
            .bind(input.month)
            .execute(&mut *tx)
            .await?;

        let salary = sqlx::query_as::<_, Salary>(&format!(
            r#"
            INSERT INTO salaries (
                id, contract_id, year, month, total_minutes, total_hours,
                base_pay, overtime_pay, night_pay, holiday_pay, gross_pay,
                national_pension, health_insurance, long_term_care,
                employment_insurance, income_tax, local_income_tax,
                total_deduction, net_pay, payment_due_date, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SALARY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.contract_id)
        .bind(input.year)
        .bind(input.month)
        .bind(input.total_minutes)
        .bind(&input.total_hours)
        .bind(&input.base_pay)
        .bind(&input.overtime_pay)
        .bind(&input.night_pay)
        .bind(&input.holiday_pay)
        .bind(&input.gross_pay)
        .bind(&input.national_pension)
        .bind(&input.health_insurance)
        .bind(&input.long_term_care)
        .bind(&input.employment_insurance)
        .bind(&input.income_tax)
        .bind(&input.local_income_tax)
        .bind(&input.total_deduction)
        .bind(&input.net_pay)
        .bind(input.payment_due_date)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (id, salary_id, method, status, created_at, updated_at)
            VALUES (?, ?, ?, 'pending', ?, ?)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(salary.id)
        .bind(method)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((salary, payment)))
    }
}
