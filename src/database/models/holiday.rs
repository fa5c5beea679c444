use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One public holiday date. The `date` column is unique; a date is a
/// holiday exactly when a row exists for it, regardless of weekday.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Uuid,
    pub date: NaiveDate,
    pub year: i32,
    pub name: String,
    pub holiday_type: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Holiday entry as delivered by an upstream source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub holiday_type: String,
    #[serde(default)]
    pub remarks: Option<String>,
}
