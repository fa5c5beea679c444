use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::{Contract, ContractAmendment, ContractInput, WorkDayInput};
use crate::database::repositories::{ContractRepository, WorkplaceRepository};
use crate::error::{AppError, AppResult};

/// Contract lifecycle: creation with full validation, amendments, and
/// soft termination. Every precondition is checked up front so a rejected
/// call mutates nothing.
#[derive(Clone)]
pub struct ContractService {
    contracts: ContractRepository,
    workplaces: WorkplaceRepository,
}

impl ContractService {
    pub fn new(contracts: ContractRepository, workplaces: WorkplaceRepository) -> Self {
        Self {
            contracts,
            workplaces,
        }
    }

    pub async fn create(&self, input: ContractInput) -> AppResult<Contract> {
        if input.hourly_wage.is_negative() {
            return Err(AppError::Validation(format!(
                "Hourly wage {} must not be negative",
                input.hourly_wage
            )));
        }
        validate_payment_day(input.payment_day)?;
        if let Some(end) = input.end_date {
            if end < input.start_date {
                return Err(AppError::Validation(format!(
                    "End date {} precedes start date {}",
                    end, input.start_date
                )));
            }
        }
        validate_work_days(&input.work_days)?;

        let workplace = self
            .workplaces
            .find_by_id(input.workplace_id)
            .await?
            .ok_or_else(|| AppError::not_found("workplace", input.workplace_id))?;

        let contract = self
            .contracts
            .create(
                workplace.id,
                input.worker_id,
                workplace.employer_id,
                input.hourly_wage,
                input.start_date,
                input.end_date,
                input.payment_day,
                &input.work_days,
            )
            .await?;

        Ok(contract)
    }

    pub async fn find(&self, id: Uuid) -> AppResult<Contract> {
        self.contracts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", id))
    }

    pub async fn amend(&self, id: Uuid, amendment: ContractAmendment) -> AppResult<Contract> {
        let mut contract = self.find(id).await?;

        if let Some(wage) = amendment.hourly_wage {
            if wage.is_negative() {
                return Err(AppError::Validation(format!(
                    "Hourly wage {} must not be negative",
                    wage
                )));
            }
            contract = self
                .contracts
                .update_wage(id, wage)
                .await?
                .ok_or_else(|| AppError::not_found("contract", id))?;
        }

        if let Some(day) = amendment.payment_day {
            validate_payment_day(day)?;
            contract = self
                .contracts
                .update_payment_day(id, day)
                .await?
                .ok_or_else(|| AppError::not_found("contract", id))?;
        }

        if let Some(end) = amendment.end_date {
            if end < contract.start_date {
                return Err(AppError::Validation(format!(
                    "End date {} precedes start date {}",
                    end, contract.start_date
                )));
            }
            contract = self
                .contracts
                .update_end_date(id, end)
                .await?
                .ok_or_else(|| AppError::not_found("contract", id))?;
        }

        if let Some(ref work_days) = amendment.work_days {
            validate_work_days(work_days)?;
            self.contracts.replace_work_days(id, work_days).await?;
        }

        Ok(contract)
    }

    /// Terminated contracts stop generating shifts; history stays intact.
    pub async fn terminate(&self, id: Uuid, termination_date: NaiveDate) -> AppResult<Contract> {
        let contract = self.find(id).await?;
        if !contract.active {
            return Err(AppError::InvalidState(format!(
                "Contract {} is already terminated",
                id
            )));
        }

        self.contracts
            .terminate(id, termination_date)
            .await?
            .ok_or_else(|| AppError::not_found("contract", id))
    }
}

fn validate_payment_day(day: i32) -> AppResult<()> {
    if !(1..=31).contains(&day) {
        return Err(AppError::Validation(format!(
            "Payment day {} must be between 1 and 31",
            day
        )));
    }
    Ok(())
}

fn validate_work_days(work_days: &[WorkDayInput]) -> AppResult<()> {
    let mut seen = std::collections::HashSet::new();
    for day in work_days {
        if !(1..=7).contains(&day.weekday) {
            return Err(AppError::Validation(format!(
                "Weekday {} must be between 1 (Monday) and 7 (Sunday)",
                day.weekday
            )));
        }
        if !seen.insert(day.weekday) {
            return Err(AppError::Validation(format!(
                "Weekday {} is configured twice",
                day.weekday
            )));
        }
        if day.start_time >= day.end_time {
            return Err(AppError::Validation(format!(
                "Work day {}: start {} must be before end {}",
                day.weekday, day.start_time, day.end_time
            )));
        }
    }
    Ok(())
}
