use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Holiday, HolidayRecord};
use crate::database::utils::month_bounds;

const HOLIDAY_COLUMNS: &str = r#"
    id, date, year, name, holiday_type, remarks, created_at
"#;

#[derive(Clone)]
pub struct HolidayRepository {
    pool: SqlitePool,
}

impl HolidayRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        let hit = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM holidays WHERE date = ?")
            .bind(date)
            .fetch_one(&self.pool)
            .await?;

        Ok(hit > 0)
    }

    pub async fn holidays_for_year(&self, year: i32) -> Result<Vec<Holiday>> {
        let holidays = sqlx::query_as::<_, Holiday>(&format!(
            "SELECT {HOLIDAY_COLUMNS} FROM holidays WHERE year = ? ORDER BY date"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    pub async fn holidays_for_month(&self, year: i32, month: u32) -> Result<Vec<Holiday>> {
        let (first, next) = month_bounds(year, month)?;
        let holidays = sqlx::query_as::<_, Holiday>(&format!(
            r#"
            SELECT {HOLIDAY_COLUMNS}
            FROM holidays
            WHERE date >= ? AND date < ?
            ORDER BY date
            "#
        ))
        .bind(first)
        .bind(next)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    /// All-or-nothing yearly refresh: delete the year, bulk insert the new
    /// rows, commit. Any failure rolls the whole year back, so a broken
    /// upstream payload can never leave partial calendar data behind.
    pub async fn replace_year(&self, year: i32, records: &[HolidayRecord]) -> Result<usize> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM holidays WHERE year = ?")
            .bind(year)
            .execute(&mut *tx)
            .await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO holidays (id, date, year, name, holiday_type, remarks, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(record.date)
            .bind(year)
            .bind(&record.name)
            .bind(&record.holiday_type)
            .bind(&record.remarks)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(records.len())
    }
}
