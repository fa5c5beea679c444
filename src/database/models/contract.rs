use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::types::Numeric;

/// Employment contract between one worker and one workplace. The weekly
/// work pattern lives in `contract_work_days`, one row per weekday.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub workplace_id: Uuid,
    pub worker_id: Uuid,
    pub employer_id: Uuid,
    pub hourly_wage: Numeric,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Day of month (1-31) the monthly salary falls due.
    pub payment_day: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Whether a work date falls inside the contract's validity window.
    pub fn covers(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// True when the given actor is one of the two contract parties.
    pub fn is_party(&self, actor_id: Uuid) -> bool {
        actor_id == self.worker_id || actor_id == self.employer_id
    }

    /// The other party relative to `actor_id`, if the actor is a party.
    pub fn counterparty_of(&self, actor_id: Uuid) -> Option<Uuid> {
        if actor_id == self.worker_id {
            Some(self.employer_id)
        } else if actor_id == self.employer_id {
            Some(self.worker_id)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContractWorkDay {
    pub contract_id: Uuid,
    /// ISO weekday number, 1 = Monday .. 7 = Sunday.
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayInput {
    pub weekday: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInput {
    pub workplace_id: Uuid,
    pub worker_id: Uuid,
    pub hourly_wage: Numeric,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub payment_day: i32,
    pub work_days: Vec<WorkDayInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAmendment {
    pub hourly_wage: Option<Numeric>,
    pub payment_day: Option<i32>,
    pub end_date: Option<NaiveDate>,
    pub work_days: Option<Vec<WorkDayInput>>,
}
