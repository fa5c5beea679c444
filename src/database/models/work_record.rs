use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::macros::string_enum;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// One dated shift belonging to a contract. An `end_time` at or before
/// `start_time` means the shift runs past midnight into the next day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: WorkRecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkRecord {
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Worked duration in whole minutes, unfolding shifts that cross
    /// midnight.
    pub fn worked_minutes(&self) -> i64 {
        span_minutes(self.start_time, self.end_time)
    }

    /// Start/end of the shift as minute offsets from the work date's
    /// midnight; the end may exceed 24h for midnight-crossing shifts.
    pub fn minute_span(&self) -> (i64, i64) {
        let start = minute_of_day(self.start_time);
        let mut end = minute_of_day(self.end_time);
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }
}

pub fn minute_of_day(t: NaiveTime) -> i64 {
    t.hour() as i64 * 60 + t.minute() as i64
}

/// Duration in minutes from `start` to `end`, treating `end <= start` as
/// crossing into the next day.
pub fn span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let s = minute_of_day(start);
    let mut e = minute_of_day(end);
    if e <= s {
        e += MINUTES_PER_DAY;
    }
    e - s
}

string_enum! {
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum WorkRecordStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        Deleted => "deleted",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecordInput {
    pub contract_id: Uuid,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
