use uuid::Uuid;

use crate::database::models::{
    CorrectionDecision, CorrectionRequest, CorrectionRequestInput, CorrectionStatus,
    WorkRecordStatus,
};
use crate::database::repositories::{
    ContractRepository, CorrectionRepository, WorkRecordRepository,
};
use crate::error::{AppError, AppResult};
use crate::services::events::{EventLogger, entity, event_type};

/// Correction workflow over committed work records: either party proposes
/// a date/time change, the counterparty resolves it exactly once. Approval
/// rewrites the record and stamps the request in a single transaction.
#[derive(Clone)]
pub struct CorrectionService {
    corrections: CorrectionRepository,
    work_records: WorkRecordRepository,
    contracts: ContractRepository,
    events: EventLogger,
}

impl CorrectionService {
    pub fn new(
        corrections: CorrectionRepository,
        work_records: WorkRecordRepository,
        contracts: ContractRepository,
        events: EventLogger,
    ) -> Self {
        Self {
            corrections,
            work_records,
            contracts,
            events,
        }
    }

    pub async fn create_request(
        &self,
        input: CorrectionRequestInput,
    ) -> AppResult<CorrectionRequest> {
        let record = self
            .work_records
            .find_by_id(input.work_record_id)
            .await?
            .ok_or_else(|| AppError::not_found("work record", input.work_record_id))?;

        if record.status == WorkRecordStatus::Deleted {
            return Err(AppError::Validation(format!(
                "Work record {} is deleted and cannot be corrected",
                record.id
            )));
        }

        let contract = self
            .contracts
            .find_by_id(record.contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", record.contract_id))?;

        if !contract.is_party(input.requested_by) {
            return Err(AppError::Unauthorized(format!(
                "Actor {} is not a party to contract {}",
                input.requested_by, contract.id
            )));
        }
        if input.proposed_start_time == input.proposed_end_time {
            return Err(AppError::Validation(
                "Proposed start and end times must differ".to_string(),
            ));
        }

        let request = self.corrections.create(input).await?;

        self.events
            .emit(
                event_type::CORRECTION_REQUESTED,
                entity::CORRECTION_REQUEST,
                request.id,
                format!(
                    "Correction requested on work record {} for {}",
                    request.work_record_id, request.proposed_date
                ),
                Some(EventLogger::metadata(vec![
                    ("workRecordId", request.work_record_id.to_string()),
                    ("requestedBy", request.requested_by.to_string()),
                ])),
            )
            .await;

        Ok(request)
    }

    pub async fn find(&self, id: Uuid) -> AppResult<CorrectionRequest> {
        self.corrections
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("correction request", id))
    }

    /// Resolve a pending request. Only the counterparty of the requester
    /// may do so, and only once; re-resolution is an invalid-state error,
    /// not a no-op.
    pub async fn resolve(
        &self,
        actor_id: Uuid,
        request_id: Uuid,
        decision: CorrectionDecision,
        review_comment: Option<String>,
    ) -> AppResult<CorrectionRequest> {
        let request = self.find(request_id).await?;

        if request.status != CorrectionStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Correction request {} is already {}",
                request_id, request.status
            )));
        }

        let record = self
            .work_records
            .find_by_id(request.work_record_id)
            .await?
            .ok_or_else(|| AppError::not_found("work record", request.work_record_id))?;
        let contract = self
            .contracts
            .find_by_id(record.contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", record.contract_id))?;

        let counterparty = contract.counterparty_of(request.requested_by);
        if counterparty != Some(actor_id) {
            return Err(AppError::Unauthorized(format!(
                "Actor {} is not the counterparty for correction request {}",
                actor_id, request_id
            )));
        }

        let resolved = self
            .corrections
            .resolve(request_id, decision, actor_id, review_comment)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "Correction request {} was resolved concurrently",
                    request_id
                ))
            })?;

        let (event, description) = match decision {
            CorrectionDecision::Approve => (
                event_type::CORRECTION_APPROVED,
                format!(
                    "Correction approved: work record {} moved to {} {}-{}",
                    resolved.work_record_id,
                    resolved.proposed_date,
                    resolved.proposed_start_time,
                    resolved.proposed_end_time
                ),
            ),
            CorrectionDecision::Reject => (
                event_type::CORRECTION_REJECTED,
                format!(
                    "Correction rejected on work record {}",
                    resolved.work_record_id
                ),
            ),
        };
        self.events
            .emit(
                event,
                entity::CORRECTION_REQUEST,
                resolved.id,
                description,
                Some(EventLogger::metadata(vec![
                    ("workRecordId", resolved.work_record_id.to_string()),
                    ("reviewedBy", actor_id.to_string()),
                    (
                        "previousDate",
                        format!("{} {}-{}", record.work_date, record.start_time, record.end_time),
                    ),
                ])),
            )
            .await;

        Ok(resolved)
    }
}
