use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::macros::string_enum;

/// Settlement record for exactly one salary. `completed_at` and
/// `transaction_ref` are set iff completed; `failure_reason` iff failed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub salary_id: Uuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub transaction_ref: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_terminal(&self) -> bool {
        self.status != PaymentStatus::Pending
    }
}

string_enum! {
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum PaymentMethod {
        BankTransfer => "bank_transfer",
        Cash => "cash",
        DeepLink => "deep_link",
    }
}

string_enum! {
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub enum PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    }
}
