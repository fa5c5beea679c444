use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::Payment;
use crate::database::repositories::PaymentRepository;
use crate::error::{AppError, AppResult};
use crate::services::events::{EventLogger, entity, event_type};

/// Tally of one expiry sweep. Per-record failures are counted, never
/// propagated; the next scheduled run re-evaluates whatever is left.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    pub scanned: usize,
    pub expired: usize,
    pub errors: usize,
}

/// Settlement lifecycle: one-way transitions out of `pending` and the
/// calendar-driven expiry sweep.
#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    events: EventLogger,
}

impl PaymentService {
    pub fn new(payments: PaymentRepository, events: EventLogger) -> Self {
        Self { payments, events }
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("payment", id))
    }

    pub async fn complete(&self, id: Uuid, transaction_ref: &str) -> AppResult<Payment> {
        // Existence first so a missing id reads as NotFound, not as a
        // state violation.
        self.find(id).await?;

        let payment = self
            .payments
            .complete(id, transaction_ref)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState(format!("Payment {} is no longer pending", id))
            })?;

        self.events
            .emit(
                event_type::PAYMENT_COMPLETED,
                entity::PAYMENT,
                payment.id,
                format!("Payment {} completed ({})", payment.id, transaction_ref),
                Some(EventLogger::metadata(vec![
                    ("salaryId", payment.salary_id.to_string()),
                    ("transactionRef", transaction_ref.to_string()),
                ])),
            )
            .await;

        Ok(payment)
    }

    pub async fn fail(&self, id: Uuid, reason: &str) -> AppResult<Payment> {
        self.find(id).await?;

        let payment = self.payments.fail(id, reason).await?.ok_or_else(|| {
            AppError::InvalidState(format!("Payment {} is no longer pending", id))
        })?;

        self.events
            .emit(
                event_type::PAYMENT_FAILED,
                entity::PAYMENT,
                payment.id,
                format!("Payment {} failed: {}", payment.id, reason),
                Some(EventLogger::metadata(vec![
                    ("salaryId", payment.salary_id.to_string()),
                    ("reason", reason.to_string()),
                ])),
            )
            .await;

        Ok(payment)
    }

    /// Fail every still-pending payment whose due date has passed as of
    /// `as_of`. Records are processed independently; an error on one is
    /// logged and tallied while the sweep moves on.
    pub async fn expire_overdue(&self, as_of: NaiveDate) -> AppResult<SweepOutcome> {
        let overdue = self.payments.find_overdue_pending(as_of).await?;

        let mut outcome = SweepOutcome {
            scanned: overdue.len(),
            ..Default::default()
        };

        for row in overdue {
            let reason = format!(
                "Payment due date {} passed without settlement",
                row.payment_due_date
            );
            match self.payments.fail(row.payment.id, &reason).await {
                Ok(Some(payment)) => {
                    outcome.expired += 1;
                    self.events
                        .emit(
                            event_type::PAYMENT_FAILED,
                            entity::PAYMENT,
                            payment.id,
                            format!("Payment {} expired: {}", payment.id, reason),
                            Some(EventLogger::metadata(vec![
                                ("salaryId", payment.salary_id.to_string()),
                                ("dueDate", row.payment_due_date.to_string()),
                            ])),
                        )
                        .await;
                }
                // Raced into a terminal state since we selected it; the
                // terminal-stays-terminal rule wins.
                Ok(None) => {}
                Err(e) => {
                    log::error!("Expiry sweep failed for payment {}: {}", row.payment.id, e);
                    outcome.errors += 1;
                }
            }
        }

        log::info!(
            "Payment expiry sweep as of {}: {} scanned, {} expired, {} errors",
            as_of,
            outcome.scanned,
            outcome.expired,
            outcome.errors
        );
        Ok(outcome)
    }
}
