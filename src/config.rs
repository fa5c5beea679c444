use std::env;
use std::str::FromStr;

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::NaiveTime;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub environment: String,
    pub holiday_data_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:albapay.db".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            holiday_data_path: env::var("HOLIDAY_DATA_PATH")
                .unwrap_or_else(|_| "data/holidays.json".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Statutory pay differentials and deduction rates.
///
/// Every multiplier and threshold the wage calculator applies lives here so
/// that rate changes (or jurisdictions with different rules) are a matter of
/// configuration, not code.
#[derive(Debug, Clone)]
pub struct PayrollPolicy {
    /// Multiplier applied to hours beyond the daily threshold.
    pub overtime_multiplier: BigDecimal,
    /// Additional premium rate for hours inside the night window.
    pub night_premium_rate: BigDecimal,
    /// Additional premium rate for hours worked on a holiday.
    pub holiday_premium_rate: BigDecimal,
    /// Daily ordinary-hours threshold, in minutes.
    pub daily_overtime_threshold_minutes: i64,
    pub night_window_start: NaiveTime,
    pub night_window_end: NaiveTime,
    /// Worker-side deduction rates, as fractions of gross pay.
    pub national_pension_rate: BigDecimal,
    pub health_insurance_rate: BigDecimal,
    /// Fraction of the health insurance amount, not of gross.
    pub long_term_care_rate: BigDecimal,
    pub employment_insurance_rate: BigDecimal,
    pub income_tax_rate: BigDecimal,
    /// Fraction of the income tax amount.
    pub local_income_tax_rate: BigDecimal,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        PayrollPolicy {
            overtime_multiplier: dec("1.5"),
            night_premium_rate: dec("0.5"),
            holiday_premium_rate: dec("0.5"),
            daily_overtime_threshold_minutes: 8 * 60,
            night_window_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            night_window_end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            national_pension_rate: dec("0.045"),
            health_insurance_rate: dec("0.03545"),
            long_term_care_rate: dec("0.1295"),
            employment_insurance_rate: dec("0.009"),
            income_tax_rate: dec("0.027"),
            local_income_tax_rate: dec("0.1"),
        }
    }
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}
