use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use albapay::AppError;
use albapay::database::models::HolidayRecord;
use albapay::services::{HolidaySource, JsonHolidaySource};
use albapay::AppResult;

mod common;
use common::{StaticHolidaySource, TestApp, d, holiday};

/// Source that always fails, standing in for an unreachable upstream.
struct BrokenSource;

impl HolidaySource for BrokenSource {
    async fn fetch_year(&self, _year: i32) -> AppResult<Vec<HolidayRecord>> {
        Err(AppError::Upstream("calendar endpoint unreachable".to_string()))
    }
}

#[tokio::test]
async fn calendar_answers_by_stored_date_only() {
    let app = TestApp::new().await.unwrap();
    app.state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![
                holiday(d(2025, 1, 1), "New Year's Day"),
                holiday(d(2025, 3, 1), "Independence Movement Day"),
            ]),
            2025,
        )
        .await
        .unwrap();

    assert!(app.state.holidays.is_holiday(d(2025, 1, 1)).await.unwrap());
    assert!(app.state.holidays.is_holiday(d(2025, 3, 1)).await.unwrap());
    // March 1st 2025 is a Saturday, but ordinary Saturdays are not
    // holidays: weekend status never comes from this store.
    assert!(!app.state.holidays.is_holiday(d(2025, 3, 8)).await.unwrap());
    assert!(!app.state.holidays.is_holiday(d(2025, 1, 2)).await.unwrap());
}

#[tokio::test]
async fn listings_come_back_ordered() {
    let app = TestApp::new().await.unwrap();
    app.state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![
                holiday(d(2025, 10, 6), "Chuseok"),
                holiday(d(2025, 1, 1), "New Year's Day"),
                holiday(d(2025, 10, 3), "National Foundation Day"),
            ]),
            2025,
        )
        .await
        .unwrap();

    let year = app.state.holidays.holidays_for_year(2025).await.unwrap();
    let dates: Vec<_> = year.iter().map(|h| h.date).collect();
    assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 10, 3), d(2025, 10, 6)]);

    let october = app
        .state
        .holidays
        .holidays_for_month(2025, 10)
        .await
        .unwrap();
    let dates: Vec<_> = october.iter().map(|h| h.date).collect();
    assert_eq!(dates, vec![d(2025, 10, 3), d(2025, 10, 6)]);
}

#[tokio::test]
async fn refresh_replaces_the_year_wholesale() {
    let app = TestApp::new().await.unwrap();
    app.state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![
                holiday(d(2025, 1, 1), "New Year's Day"),
                holiday(d(2025, 5, 5), "Children's Day"),
            ]),
            2025,
        )
        .await
        .unwrap();

    // Second refresh drops the stale May entry.
    app.state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![holiday(d(2025, 1, 1), "New Year's Day")]),
            2025,
        )
        .await
        .unwrap();

    let year = app.state.holidays.holidays_for_year(2025).await.unwrap();
    assert_eq!(year.len(), 1);
    assert!(!app.state.holidays.is_holiday(d(2025, 5, 5)).await.unwrap());
}

#[tokio::test]
async fn failed_refresh_leaves_existing_data_intact() {
    let app = TestApp::new().await.unwrap();
    app.state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![holiday(d(2025, 1, 1), "New Year's Day")]),
            2025,
        )
        .await
        .unwrap();

    let result = app.state.holidays.refresh_year(&BrokenSource, 2025).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));

    // A rejected payload fails the same way.
    let rejected = app
        .state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![
                holiday(d(2025, 8, 15), "Liberation Day"),
                holiday(d(2025, 8, 15), "Duplicate"),
            ]),
            2025,
        )
        .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));

    // Either way the stored year is exactly what the last good refresh
    // left behind.
    let year = app.state.holidays.holidays_for_year(2025).await.unwrap();
    assert_eq!(year.len(), 1);
    assert_eq!(year[0].date, d(2025, 1, 1));
}

#[tokio::test]
async fn out_of_year_records_are_rejected() {
    let app = TestApp::new().await.unwrap();
    let result = app
        .state
        .holidays
        .refresh_year(
            &StaticHolidaySource(vec![holiday(d(2024, 12, 25), "Christmas Day")]),
            2025,
        )
        .await;
    // The static source filters by year, so this comes back empty rather
    // than invalid; feed the validator directly through a file source.
    assert!(result.is_ok());

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{ "date": "2024-12-25", "name": "Christmas Day", "type": "public", "remarks": null }}]"#
    )
    .unwrap();
    let source = JsonHolidaySource::new(file.path());
    let records = source.fetch_year(2024).await.unwrap();
    assert_eq!(records.len(), 1);

    // Asking the same file for 2025 filters everything out.
    let empty = source.fetch_year(2025).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn file_source_reports_upstream_failures() {
    let missing = JsonHolidaySource::new("/nonexistent/holidays.json");
    let result = missing.fetch_year(2025).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "this is not json").unwrap();
    let malformed = JsonHolidaySource::new(file.path());
    let result = malformed.fetch_year(2025).await;
    assert!(matches!(result, Err(AppError::Upstream(_))));
}
