use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workplace {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub name: String,
    /// Workplaces with fewer than five employees are exempt from the
    /// overtime, night and holiday premiums.
    pub under_five_employees: bool,
    /// Whether Saturday/Sunday work earns the holiday premium here.
    pub weekend_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkplaceInput {
    pub employer_id: Uuid,
    pub name: String,
    pub under_five_employees: bool,
    pub weekend_premium: bool,
}
