use pretty_assertions::assert_eq;
use uuid::Uuid;

use albapay::AppError;
use albapay::database::models::{ContractAmendment, ContractInput};
use albapay::database::types::Numeric;

mod common;
use common::{TestApp, create_contract, create_workplace, d, t, workday};

#[tokio::test]
async fn creation_validates_its_preconditions() {
    let app = TestApp::new().await.unwrap();
    let workplace = create_workplace(&app.state, false, false).await.unwrap();

    let base = ContractInput {
        workplace_id: workplace.id,
        worker_id: Uuid::new_v4(),
        hourly_wage: Numeric::from_i64(10030),
        start_date: d(2025, 1, 1),
        end_date: None,
        payment_day: 10,
        work_days: vec![workday(1, t(9, 0), t(18, 0))],
    };

    // Negative wage
    let mut bad = base.clone();
    bad.hourly_wage = "-1".parse().unwrap();
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::Validation(_))
    ));

    // Payment day out of range
    let mut bad = base.clone();
    bad.payment_day = 32;
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::Validation(_))
    ));

    // End before start
    let mut bad = base.clone();
    bad.end_date = Some(d(2024, 12, 31));
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::Validation(_))
    ));

    // Work day with start after end
    let mut bad = base.clone();
    bad.work_days = vec![workday(1, t(18, 0), t(9, 0))];
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::Validation(_))
    ));

    // Duplicate weekday
    let mut bad = base.clone();
    bad.work_days = vec![workday(1, t(9, 0), t(12, 0)), workday(1, t(13, 0), t(18, 0))];
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::Validation(_))
    ));

    // Unknown workplace
    let mut bad = base.clone();
    bad.workplace_id = Uuid::new_v4();
    assert!(matches!(
        app.state.contracts.create(bad).await,
        Err(AppError::NotFound(_))
    ));

    // And the clean input goes through, inheriting the workplace's
    // employer as counterparty.
    let contract = app.state.contracts.create(base).await.unwrap();
    assert_eq!(contract.employer_id, workplace.employer_id);
    assert!(contract.active);
}

#[tokio::test]
async fn amendments_update_wage_payday_and_pattern() {
    let app = TestApp::new().await.unwrap();
    let workplace = create_workplace(&app.state, false, false).await.unwrap();
    let contract = create_contract(
        &app.state,
        &workplace,
        10000,
        d(2025, 1, 1),
        None,
        10,
        vec![workday(1, t(9, 0), t(18, 0))],
    )
    .await
    .unwrap();

    let amended = app
        .state
        .contracts
        .amend(
            contract.id,
            ContractAmendment {
                hourly_wage: Some(Numeric::from_i64(11000)),
                payment_day: Some(25),
                end_date: Some(d(2025, 12, 31)),
                work_days: Some(vec![
                    workday(3, t(14, 0), t(22, 0)),
                    workday(5, t(14, 0), t(22, 0)),
                ]),
            },
        )
        .await
        .unwrap();

    assert_eq!(amended.hourly_wage, Numeric::from_i64(11000));
    assert_eq!(amended.payment_day, 25);
    assert_eq!(amended.end_date, Some(d(2025, 12, 31)));

    // Fresh pattern drives generation from now on: Wednesdays and
    // Fridays only.
    let outcome = app
        .state
        .generator
        .generate_for_month(&contract, 2025, 2)
        .await
        .unwrap();
    assert_eq!(outcome.created, 8);
}

#[tokio::test]
async fn termination_is_soft_and_final() {
    let app = TestApp::new().await.unwrap();
    let workplace = create_workplace(&app.state, false, false).await.unwrap();
    let contract = create_contract(
        &app.state,
        &workplace,
        10000,
        d(2025, 1, 1),
        None,
        10,
        vec![workday(1, t(9, 0), t(18, 0))],
    )
    .await
    .unwrap();

    let terminated = app
        .state
        .contracts
        .terminate(contract.id, d(2025, 3, 15))
        .await
        .unwrap();
    assert!(!terminated.active);
    assert_eq!(terminated.end_date, Some(d(2025, 3, 15)));

    let again = app.state.contracts.terminate(contract.id, d(2025, 4, 1)).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));
}

#[tokio::test]
async fn expired_tokens_are_purged_and_live_ones_kept() {
    use chrono::{Duration, Utc};

    let app = TestApp::new().await.unwrap();
    let user = Uuid::new_v4();
    app.state
        .tokens
        .create(user, "stale-token", Utc::now() - Duration::hours(2))
        .await
        .unwrap();
    app.state
        .tokens
        .create(user, "live-token", Utc::now() + Duration::hours(2))
        .await
        .unwrap();

    let purged = app.state.tokens.purge_expired(Utc::now()).await.unwrap();
    assert_eq!(purged, 1);

    let rerun = app.state.tokens.purge_expired(Utc::now()).await.unwrap();
    assert_eq!(rerun, 0);
}
