use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::macros::string_enum;

/// Proposal to retroactively amend a committed work record. Once resolved
/// the row is immutable; resolution data is kept for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub id: Uuid,
    pub work_record_id: Uuid,
    pub requested_by: Uuid,
    pub proposed_date: NaiveDate,
    pub proposed_start_time: NaiveTime,
    pub proposed_end_time: NaiveTime,
    pub reason: String,
    pub status: CorrectionStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

string_enum! {
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum CorrectionStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequestInput {
    pub work_record_id: Uuid,
    pub requested_by: Uuid,
    pub proposed_date: NaiveDate,
    pub proposed_start_time: NaiveTime,
    pub proposed_end_time: NaiveTime,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionDecision {
    Approve,
    Reject,
}
