#![allow(dead_code)]

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use fake::Fake;
use fake::faker::company::en::CompanyName;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::NamedTempFile;
use uuid::Uuid;

use albapay::database::models::{
    Contract, ContractInput, HolidayRecord, WorkDayInput, Workplace, WorkplaceInput,
};
use albapay::database::types::Numeric;
use albapay::services::HolidaySource;
use albapay::{AppResult, AppState, PayrollPolicy};

/// Test database wrapper that provides isolated testing environment
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_file: NamedTempFile,
}

impl TestDb {
    /// Create a new test database with fresh schema
    pub async fn new() -> Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let database_url = format!("sqlite:{}", temp_file.path().display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(TestDb {
            pool,
            _temp_file: temp_file,
        })
    }
}

/// Fully wired application state over an isolated database
pub struct TestApp {
    pub db: TestDb,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        Self::with_policy(PayrollPolicy::default()).await
    }

    pub async fn with_policy(policy: PayrollPolicy) -> Result<Self> {
        let db = TestDb::new().await?;
        let state = AppState::new(db.pool.clone(), policy);
        Ok(TestApp { db, state })
    }
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn workday(weekday: i32, start: NaiveTime, end: NaiveTime) -> WorkDayInput {
    WorkDayInput {
        weekday,
        start_time: start,
        end_time: end,
    }
}

pub async fn create_workplace(
    state: &AppState,
    under_five_employees: bool,
    weekend_premium: bool,
) -> Result<Workplace> {
    let workplace = state
        .workplaces
        .create(WorkplaceInput {
            employer_id: Uuid::new_v4(),
            name: CompanyName().fake(),
            under_five_employees,
            weekend_premium,
        })
        .await?;
    Ok(workplace)
}

/// In-memory holiday source for seeding the calendar in tests.
pub struct StaticHolidaySource(pub Vec<HolidayRecord>);

impl HolidaySource for StaticHolidaySource {
    async fn fetch_year(&self, year: i32) -> AppResult<Vec<HolidayRecord>> {
        use chrono::Datelike;
        Ok(self
            .0
            .iter()
            .filter(|r| r.date.year() == year)
            .cloned()
            .collect())
    }
}

pub fn holiday(date: NaiveDate, name: &str) -> HolidayRecord {
    HolidayRecord {
        date,
        name: name.to_string(),
        holiday_type: "public".to_string(),
        remarks: None,
    }
}

pub async fn create_contract(
    state: &AppState,
    workplace: &Workplace,
    hourly_wage: i64,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    payment_day: i32,
    work_days: Vec<WorkDayInput>,
) -> Result<Contract> {
    let contract = state
        .contracts
        .create(ContractInput {
            workplace_id: workplace.id,
            worker_id: Uuid::new_v4(),
            hourly_wage: Numeric::from_i64(hourly_wage),
            start_date,
            end_date,
            payment_day,
            work_days,
        })
        .await?;
    Ok(contract)
}
