use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::types::Numeric;

/// Itemized monthly wage statement for one contract. Amounts are whole
/// KRW; every component is rounded before summation so the additivity
/// invariants hold exactly: gross = base + overtime + night + holiday,
/// net = gross - total deduction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub total_minutes: i64,
    pub total_hours: Numeric,
    pub base_pay: Numeric,
    pub overtime_pay: Numeric,
    pub night_pay: Numeric,
    pub holiday_pay: Numeric,
    pub gross_pay: Numeric,
    pub national_pension: Numeric,
    pub health_insurance: Numeric,
    pub long_term_care: Numeric,
    pub employment_insurance: Numeric,
    pub income_tax: Numeric,
    pub local_income_tax: Numeric,
    pub total_deduction: Numeric,
    pub net_pay: Numeric,
    pub payment_due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully computed statement ready to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    pub contract_id: Uuid,
    pub year: i32,
    pub month: i32,
    pub total_minutes: i64,
    pub total_hours: Numeric,
    pub base_pay: Numeric,
    pub overtime_pay: Numeric,
    pub night_pay: Numeric,
    pub holiday_pay: Numeric,
    pub gross_pay: Numeric,
    pub national_pension: Numeric,
    pub health_insurance: Numeric,
    pub long_term_care: Numeric,
    pub employment_insurance: Numeric,
    pub income_tax: Numeric,
    pub local_income_tax: Numeric,
    pub total_deduction: Numeric,
    pub net_pay: Numeric,
    pub payment_due_date: NaiveDate,
}
