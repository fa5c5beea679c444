use anyhow::{Result, anyhow};
use chrono::{Datelike, Duration, NaiveDate};

/// First day of `(year, month)` and first day of the following month,
/// forming the half-open range covering the whole month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", next_year, next_month))?;
    Ok((first, next))
}

pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (_, next) = month_bounds(year, month)?;
    Ok(next - Duration::days(1))
}

/// The month `offset` calendar months after the month containing `date`.
pub fn shift_month(date: NaiveDate, offset: i32) -> (i32, u32) {
    let total = date.year() * 12 + date.month0() as i32 + offset;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Day-of-month clamped to the length of `(year, month)`, so a payment day
/// of 31 falls on Feb 28/29 rather than erroring.
pub fn clamped_day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let day = day.min(last.day());
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("Invalid date {}-{:02}-{:02}", year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_bounds_cover_year_end() {
        let (first, next) = month_bounds(2025, 12).unwrap();
        assert_eq!(first, d(2025, 12, 1));
        assert_eq!(next, d(2026, 1, 1));
    }

    #[test]
    fn shift_month_wraps_forward() {
        assert_eq!(shift_month(d(2025, 11, 15), 2), (2026, 1));
        assert_eq!(shift_month(d(2025, 1, 31), 1), (2025, 2));
    }

    #[test]
    fn clamped_day_handles_short_months() {
        assert_eq!(clamped_day(2025, 2, 31).unwrap(), d(2025, 2, 28));
        assert_eq!(clamped_day(2024, 2, 30).unwrap(), d(2024, 2, 29));
        assert_eq!(clamped_day(2025, 3, 15).unwrap(), d(2025, 3, 15));
    }
}
