use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Contract, ContractWorkDay, WorkDayInput};
use crate::database::types::Numeric;

const CONTRACT_COLUMNS: &str = r#"
    id, workplace_id, worker_id, employer_id, hourly_wage, start_date,
    end_date, payment_day, active, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ContractRepository {
    pool: SqlitePool,
}

impl ContractRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the contract and its weekly pattern rows in one transaction.
    pub async fn create(
        &self,
        workplace_id: Uuid,
        worker_id: Uuid,
        employer_id: Uuid,
        hourly_wage: Numeric,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        payment_day: i32,
        work_days: &[WorkDayInput],
    ) -> Result<Contract> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            INSERT INTO contracts (
                id, workplace_id, worker_id, employer_id, hourly_wage,
                start_date, end_date, payment_day, active, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, TRUE, ?, ?)
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(workplace_id)
        .bind(worker_id)
        .bind(employer_id)
        .bind(&hourly_wage)
        .bind(start_date)
        .bind(end_date)
        .bind(payment_day)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for day in work_days {
            sqlx::query(
                r#"
                INSERT INTO contract_work_days (contract_id, weekday, start_time, end_time)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(contract.id)
            .bind(day.weekday)
            .bind(day.start_time)
            .bind(day.end_time)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(contract)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn find_active(&self) -> Result<Vec<Contract>> {
        let contracts = sqlx::query_as::<_, Contract>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE active = TRUE ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts)
    }

    pub async fn work_days(&self, contract_id: Uuid) -> Result<Vec<ContractWorkDay>> {
        let days = sqlx::query_as::<_, ContractWorkDay>(
            r#"
            SELECT contract_id, weekday, start_time, end_time
            FROM contract_work_days
            WHERE contract_id = ?
            ORDER BY weekday
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }

    pub async fn update_wage(&self, id: Uuid, hourly_wage: Numeric) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts SET hourly_wage = ?, updated_at = ?
            WHERE id = ?
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(&hourly_wage)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn update_payment_day(&self, id: Uuid, payment_day: i32) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts SET payment_day = ?, updated_at = ?
            WHERE id = ?
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(payment_day)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    pub async fn update_end_date(&self, id: Uuid, end_date: NaiveDate) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts SET end_date = ?, updated_at = ?
            WHERE id = ?
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(end_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }

    /// Swap the entire weekly pattern for a new one, atomically.
    pub async fn replace_work_days(
        &self,
        contract_id: Uuid,
        work_days: &[WorkDayInput],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM contract_work_days WHERE contract_id = ?")
            .bind(contract_id)
            .execute(&mut *tx)
            .await?;

        for day in work_days {
            sqlx::query(
                r#"
                INSERT INTO contract_work_days (contract_id, weekday, start_time, end_time)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(contract_id)
            .bind(day.weekday)
            .bind(day.start_time)
            .bind(day.end_time)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE contracts SET updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(contract_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Soft termination: the contract stops generating shifts but stays
    /// available for wage history.
    pub async fn terminate(&self, id: Uuid, termination_date: NaiveDate) -> Result<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts SET active = FALSE, end_date = ?, updated_at = ?
            WHERE id = ?
            RETURNING {CONTRACT_COLUMNS}
            "#
        ))
        .bind(termination_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contract)
    }
}
