use pretty_assertions::assert_eq;

use albapay::AppError;
use albapay::database::models::{Payment, PaymentMethod, PaymentStatus, WorkRecordInput};

mod common;
use common::{TestApp, create_contract, create_workplace, d, t};

/// One computed salary with its pending payment, due on the contract's
/// payment day of the following month.
async fn pending_payment(app: &TestApp, payment_day: i32) -> Payment {
    let workplace = create_workplace(&app.state, false, false).await.unwrap();
    let contract = create_contract(
        &app.state,
        &workplace,
        10000,
        d(2024, 12, 1),
        None,
        payment_day,
        vec![],
    )
    .await
    .unwrap();
    app.state
        .shifts
        .create_manual(
            contract.employer_id,
            WorkRecordInput {
                contract_id: contract.id,
                work_date: d(2024, 12, 16),
                start_time: t(9, 0),
                end_time: t(17, 0),
            },
        )
        .await
        .unwrap();
    let salary = app
        .state
        .payroll
        .compute_salary(contract.id, 2024, 12, PaymentMethod::BankTransfer)
        .await
        .unwrap();

    app.state
        .payment_records
        .find_by_salary(salary.id)
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn completion_stamps_reference_and_timestamp() {
    let app = TestApp::new().await.unwrap();
    let payment = pending_payment(&app, 10).await;
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert!(payment.completed_at.is_none());

    let completed = app
        .state
        .payments
        .complete(payment.id, "TXN-8841")
        .await
        .unwrap();

    assert_eq!(completed.status, PaymentStatus::Completed);
    assert!(completed.completed_at.is_some());
    assert_eq!(completed.transaction_ref, Some("TXN-8841".to_string()));
    assert!(completed.failure_reason.is_none());
}

#[tokio::test]
async fn failure_stamps_the_reason() {
    let app = TestApp::new().await.unwrap();
    let payment = pending_payment(&app, 10).await;

    let failed = app
        .state
        .payments
        .fail(payment.id, "Account closed")
        .await
        .unwrap();

    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(failed.failure_reason, Some("Account closed".to_string()));
    assert!(failed.completed_at.is_none());
    assert!(failed.transaction_ref.is_none());
}

#[tokio::test]
async fn terminal_payments_refuse_further_transitions() {
    let app = TestApp::new().await.unwrap();

    let completed = pending_payment(&app, 10).await;
    app.state
        .payments
        .complete(completed.id, "TXN-1")
        .await
        .unwrap();

    let failed = pending_payment(&app, 10).await;
    app.state.payments.fail(failed.id, "Bounced").await.unwrap();

    for id in [completed.id, failed.id] {
        let complete_again = app.state.payments.complete(id, "TXN-2").await;
        assert!(matches!(complete_again, Err(AppError::InvalidState(_))));
        let fail_again = app.state.payments.fail(id, "Again").await;
        assert!(matches!(fail_again, Err(AppError::InvalidState(_))));
    }

    // Terminal rows kept their original stamps.
    let still_completed = app.state.payments.find(completed.id).await.unwrap();
    assert_eq!(still_completed.transaction_ref, Some("TXN-1".to_string()));
    let still_failed = app.state.payments.find(failed.id).await.unwrap();
    assert_eq!(still_failed.failure_reason, Some("Bounced".to_string()));
}

#[tokio::test]
async fn sweep_fails_only_payments_past_their_due_date() {
    let app = TestApp::new().await.unwrap();
    // Salary for December 2024, payment day 10: due 2025-01-10.
    let payment = pending_payment(&app, 10).await;

    // The day before the due date: nothing happens.
    let early = app
        .state
        .payments
        .expire_overdue(d(2025, 1, 9))
        .await
        .unwrap();
    assert_eq!(early.scanned, 0);
    assert_eq!(early.expired, 0);
    let still_pending = app.state.payments.find(payment.id).await.unwrap();
    assert_eq!(still_pending.status, PaymentStatus::Pending);

    // On the due date itself it has not yet passed.
    let on_due = app
        .state
        .payments
        .expire_overdue(d(2025, 1, 10))
        .await
        .unwrap();
    assert_eq!(on_due.expired, 0);

    // The day after, the payment expires with a dated reason.
    let late = app
        .state
        .payments
        .expire_overdue(d(2025, 1, 11))
        .await
        .unwrap();
    assert_eq!(late.scanned, 1);
    assert_eq!(late.expired, 1);
    assert_eq!(late.errors, 0);

    let expired = app.state.payments.find(payment.id).await.unwrap();
    assert_eq!(expired.status, PaymentStatus::Failed);
    let reason = expired.failure_reason.unwrap();
    assert!(reason.contains("2025-01-10"), "reason was: {}", reason);
}

#[tokio::test]
async fn sweep_processes_every_overdue_record_and_is_idempotent() {
    let app = TestApp::new().await.unwrap();
    let first = pending_payment(&app, 5).await;
    let second = pending_payment(&app, 10).await;
    // Due 2025-01-05 and 2025-01-10 respectively.

    let outcome = app
        .state
        .payments
        .expire_overdue(d(2025, 2, 1))
        .await
        .unwrap();
    assert_eq!(outcome.scanned, 2);
    assert_eq!(outcome.expired, 2);

    for id in [first.id, second.id] {
        let payment = app.state.payments.find(id).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
    }

    // Re-running finds nothing left to expire.
    let rerun = app
        .state
        .payments
        .expire_overdue(d(2025, 2, 1))
        .await
        .unwrap();
    assert_eq!(rerun.scanned, 0);
    assert_eq!(rerun.expired, 0);
}

#[tokio::test]
async fn expiry_is_visible_in_the_event_outbox() {
    let app = TestApp::new().await.unwrap();
    let payment = pending_payment(&app, 10).await;

    app.state
        .payments
        .expire_overdue(d(2025, 2, 1))
        .await
        .unwrap();

    let events = app
        .state
        .events
        .find_for_entity("payment", payment.id)
        .await
        .unwrap();
    assert!(events.iter().any(|e| e.event_type == "payment.failed"));
}
