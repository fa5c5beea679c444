use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::database::models::{Contract, WorkRecordInput, WorkRecordStatus};
use crate::database::repositories::{ContractRepository, WorkRecordRepository};
use crate::database::utils::month_bounds;
use crate::error::{AppError, AppResult};

/// Tally of one horizon-extension run across all active contracts.
#[derive(Debug, Clone, Default)]
pub struct HorizonOutcome {
    pub target_year: i32,
    pub target_month: u32,
    pub contracts: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    pub created: usize,
    pub skipped: usize,
}

/// Projects each contract's weekly pattern into dated work records,
/// keeping a rolling two-month lookahead populated.
#[derive(Clone)]
pub struct ShiftGeneratorService {
    contracts: ContractRepository,
    work_records: WorkRecordRepository,
}

impl ShiftGeneratorService {
    pub fn new(contracts: ContractRepository, work_records: WorkRecordRepository) -> Self {
        Self {
            contracts,
            work_records,
        }
    }

    /// Generate the month two calendar months ahead of `today` for every
    /// active contract. One contract's failure never aborts the others;
    /// failures are logged per contract and counted in the outcome.
    pub async fn extend_horizon(&self, today: NaiveDate) -> AppResult<HorizonOutcome> {
        let (year, month) = crate::database::utils::shift_month(today, 2);
        let contracts = self.contracts.find_active().await?;

        let mut outcome = HorizonOutcome {
            target_year: year,
            target_month: month,
            contracts: contracts.len(),
            ..Default::default()
        };

        for contract in &contracts {
            match self.generate_for_month(contract, year, month).await {
                Ok(generated) => {
                    outcome.created += generated.created;
                    outcome.skipped += generated.skipped;
                }
                Err(e) => {
                    log::error!(
                        "Shift generation failed for contract {}: {}",
                        contract.id,
                        e
                    );
                    outcome.failed += 1;
                }
            }
        }

        log::info!(
            "Horizon extended to {}-{:02}: {} contracts, {} created, {} skipped, {} failed",
            outcome.target_year,
            outcome.target_month,
            outcome.contracts,
            outcome.created,
            outcome.skipped,
            outcome.failed
        );
        Ok(outcome)
    }

    /// Generate the contract's scheduled records for one month. Dates that
    /// already carry any record for this contract are skipped, so the
    /// operation is idempotent and never duplicates or overwrites manual
    /// entries or deliberate deletions.
    pub async fn generate_for_month(
        &self,
        contract: &Contract,
        year: i32,
        month: u32,
    ) -> AppResult<GenerationOutcome> {
        let work_days = self.contracts.work_days(contract.id).await?;
        for day in &work_days {
            if !(1..=7).contains(&day.weekday) {
                return Err(AppError::Validation(format!(
                    "Contract {} has invalid weekday {}",
                    contract.id, day.weekday
                )));
            }
            if day.start_time >= day.end_time {
                return Err(AppError::Validation(format!(
                    "Contract {} work day {} has start {} not before end {}",
                    contract.id, day.weekday, day.start_time, day.end_time
                )));
            }
        }

        let occupied: HashSet<NaiveDate> = self
            .work_records
            .occupied_dates_for_month(contract.id, year, month)
            .await?
            .into_iter()
            .collect();

        let (first, next) = month_bounds(year, month)?;
        let mut outcome = GenerationOutcome::default();

        let mut date = first;
        while date < next {
            let weekday = date.weekday().number_from_monday() as i32;
            if let Some(day) = work_days.iter().find(|d| d.weekday == weekday) {
                if contract.covers(date) {
                    if occupied.contains(&date) {
                        outcome.skipped += 1;
                    } else {
                        self.work_records
                            .create(
                                WorkRecordInput {
                                    contract_id: contract.id,
                                    work_date: date,
                                    start_time: day.start_time,
                                    end_time: day.end_time,
                                },
                                WorkRecordStatus::Scheduled,
                            )
                            .await?;
                        outcome.created += 1;
                    }
                }
            }
            date = date + Duration::days(1);
        }

        Ok(outcome)
    }
}
