use uuid::Uuid;

use crate::database::models::{WorkRecord, WorkRecordInput, WorkRecordStatus};
use crate::database::repositories::{ContractRepository, WorkRecordRepository};
use crate::error::{AppError, AppResult};

/// Manual work-record management alongside the generator: employer entry,
/// completion, and soft deletion. Deletion keeps the row so wage history
/// and the audit trail survive.
#[derive(Clone)]
pub struct ShiftService {
    work_records: WorkRecordRepository,
    contracts: ContractRepository,
}

impl ShiftService {
    pub fn new(work_records: WorkRecordRepository, contracts: ContractRepository) -> Self {
        Self {
            work_records,
            contracts,
        }
    }

    /// Employer-entered shift outside the weekly pattern.
    pub async fn create_manual(&self, actor_id: Uuid, input: WorkRecordInput) -> AppResult<WorkRecord> {
        let contract = self
            .contracts
            .find_by_id(input.contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", input.contract_id))?;

        if actor_id != contract.employer_id {
            return Err(AppError::Unauthorized(format!(
                "Actor {} is not the employer on contract {}",
                actor_id, contract.id
            )));
        }
        if input.start_time == input.end_time {
            return Err(AppError::Validation(
                "Shift start and end times must differ".to_string(),
            ));
        }
        if !contract.covers(input.work_date) {
            return Err(AppError::Validation(format!(
                "Work date {} is outside the contract validity window",
                input.work_date
            )));
        }

        let record = self
            .work_records
            .create(input, WorkRecordStatus::Scheduled)
            .await?;
        Ok(record)
    }

    pub async fn find(&self, id: Uuid) -> AppResult<WorkRecord> {
        self.work_records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("work record", id))
    }

    /// Either party confirms the shift was actually worked.
    pub async fn mark_completed(&self, actor_id: Uuid, id: Uuid) -> AppResult<WorkRecord> {
        let record = self.find(id).await?;
        let contract = self
            .contracts
            .find_by_id(record.contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", record.contract_id))?;

        if !contract.is_party(actor_id) {
            return Err(AppError::Unauthorized(format!(
                "Actor {} is not a party to contract {}",
                actor_id, contract.id
            )));
        }
        if record.status != WorkRecordStatus::Scheduled {
            return Err(AppError::InvalidState(format!(
                "Work record {} is {} and cannot be completed",
                id, record.status
            )));
        }

        self.work_records
            .update_status(id, WorkRecordStatus::Completed)
            .await?
            .ok_or_else(|| AppError::not_found("work record", id))
    }

    /// Employer-only soft delete; the record stays for audit and the
    /// generator will not recreate its date.
    pub async fn soft_delete(&self, actor_id: Uuid, id: Uuid) -> AppResult<WorkRecord> {
        let record = self.find(id).await?;
        let contract = self
            .contracts
            .find_by_id(record.contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", record.contract_id))?;

        if actor_id != contract.employer_id {
            return Err(AppError::Unauthorized(format!(
                "Actor {} is not the employer on contract {}",
                actor_id, contract.id
            )));
        }
        if record.status == WorkRecordStatus::Deleted {
            return Err(AppError::InvalidState(format!(
                "Work record {} is already deleted",
                id
            )));
        }

        self.work_records
            .update_status(id, WorkRecordStatus::Deleted)
            .await?
            .ok_or_else(|| AppError::not_found("work record", id))
    }
}
