use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::database::models::{Holiday, HolidayRecord};
use crate::database::repositories::HolidayRepository;
use crate::error::{AppError, AppResult};

/// Upstream provider of the public-holiday calendar for one year.
///
/// The wire contract mirrors the government special-day feed: an ordered
/// list of (date, name, type, remarks) per queried year. Implementations
/// must either deliver the complete year or fail; the refresh path rejects
/// partial data wholesale.
pub trait HolidaySource {
    fn fetch_year(
        &self,
        year: i32,
    ) -> impl Future<Output = AppResult<Vec<HolidayRecord>>> + Send;
}

/// File-backed holiday source: a JSON array of holiday records covering
/// one or more years, filtered down to the requested year.
#[derive(Debug, Clone)]
pub struct JsonHolidaySource {
    path: PathBuf,
}

impl JsonHolidaySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HolidaySource for JsonHolidaySource {
    async fn fetch_year(&self, year: i32) -> AppResult<Vec<HolidayRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Upstream(format!(
                "Holiday data {} unreadable: {}",
                self.path.display(),
                e
            ))
        })?;

        let records: Vec<HolidayRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Upstream(format!(
                "Holiday data {} malformed: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(records
            .into_iter()
            .filter(|r| r.date.year() == year)
            .collect())
    }
}

/// Saturday/Sunday check. Deliberately independent of the holiday store:
/// weekend and holiday premiums are separate, non-exclusive conditions.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Clone)]
pub struct HolidayService {
    repository: HolidayRepository,
}

impl HolidayService {
    pub fn new(repository: HolidayRepository) -> Self {
        Self { repository }
    }

    pub async fn is_holiday(&self, date: NaiveDate) -> AppResult<bool> {
        Ok(self.repository.is_holiday(date).await?)
    }

    pub async fn holidays_for_year(&self, year: i32) -> AppResult<Vec<Holiday>> {
        Ok(self.repository.holidays_for_year(year).await?)
    }

    pub async fn holidays_for_month(&self, year: i32, month: u32) -> AppResult<Vec<Holiday>> {
        Ok(self.repository.holidays_for_month(year, month).await?)
    }

    /// Pull one year from the source and swap it in atomically. A source
    /// failure or a rejected payload leaves the stored year untouched.
    pub async fn refresh_year<S: HolidaySource>(
        &self,
        source: &S,
        year: i32,
    ) -> AppResult<usize> {
        let records = source.fetch_year(year).await?;
        validate_year_payload(year, &records)?;

        let count = self.repository.replace_year(year, &records).await?;
        log::info!("Holiday calendar for {} refreshed ({} entries)", year, count);
        Ok(count)
    }
}

fn validate_year_payload(year: i32, records: &[HolidayRecord]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for record in records {
        if record.date.year() != year {
            return Err(AppError::Validation(format!(
                "Holiday {} ({}) is outside year {}",
                record.date, record.name, year
            )));
        }
        if !seen.insert(record.date) {
            return Err(AppError::Validation(format!(
                "Duplicate holiday date {} in payload for {}",
                record.date, year
            )));
        }
        if record.name.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Holiday {} has an empty name",
                record.date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, name: &str) -> HolidayRecord {
        HolidayRecord {
            date: date.parse().unwrap(),
            name: name.to_string(),
            holiday_type: "public".to_string(),
            remarks: None,
        }
    }

    #[test]
    fn weekend_is_pure_weekday_math() {
        assert!(is_weekend("2025-01-11".parse().unwrap())); // Saturday
        assert!(is_weekend("2025-01-12".parse().unwrap())); // Sunday
        assert!(!is_weekend("2025-01-13".parse().unwrap())); // Monday
    }

    #[test]
    fn payload_outside_year_is_rejected() {
        let records = vec![record("2024-12-25", "Christmas")];
        assert!(validate_year_payload(2025, &records).is_err());
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let records = vec![record("2025-01-01", "New Year"), record("2025-01-01", "Dup")];
        assert!(validate_year_payload(2025, &records).is_err());
    }

    #[test]
    fn clean_payload_passes() {
        let records = vec![
            record("2025-01-01", "New Year"),
            record("2025-03-01", "Independence Movement Day"),
        ];
        assert!(validate_year_payload(2025, &records).is_ok());
    }
}
