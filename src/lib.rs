pub mod config;
pub mod database;
pub mod error;
pub mod scheduler;
pub mod services;

use sqlx::SqlitePool;

pub use config::{Config, PayrollPolicy};
pub use error::{AppError, AppResult};

use database::repositories::{
    AuthTokenRepository, ContractRepository, CorrectionRepository, EventRepository,
    HolidayRepository, PaymentRepository, SalaryRepository, WorkRecordRepository,
    WorkplaceRepository,
};
use services::{
    ContractService, CorrectionService, EventLogger, HolidayService, PaymentService,
    PayrollService, ShiftGeneratorService, ShiftService,
};

/// Every service wired over one pool. Built once in `main` and cloned into
/// the scheduler's jobs; tests build one per isolated database.
#[derive(Clone)]
pub struct AppState {
    pub workplaces: WorkplaceRepository,
    pub work_records: WorkRecordRepository,
    pub salaries: SalaryRepository,
    pub payment_records: PaymentRepository,
    pub events: EventRepository,
    pub tokens: AuthTokenRepository,
    pub contracts: ContractService,
    pub shifts: ShiftService,
    pub generator: ShiftGeneratorService,
    pub corrections: CorrectionService,
    pub holidays: HolidayService,
    pub payroll: PayrollService,
    pub payments: PaymentService,
}

impl AppState {
    pub fn new(pool: SqlitePool, policy: PayrollPolicy) -> Self {
        let workplace_repository = WorkplaceRepository::new(pool.clone());
        let contract_repository = ContractRepository::new(pool.clone());
        let work_record_repository = WorkRecordRepository::new(pool.clone());
        let correction_repository = CorrectionRepository::new(pool.clone());
        let salary_repository = SalaryRepository::new(pool.clone());
        let payment_repository = PaymentRepository::new(pool.clone());
        let holiday_repository = HolidayRepository::new(pool.clone());
        let token_repository = AuthTokenRepository::new(pool.clone());
        let event_repository = EventRepository::new(pool.clone());

        let event_logger = EventLogger::new(event_repository.clone());
        let holiday_service = HolidayService::new(holiday_repository);

        AppState {
            workplaces: workplace_repository.clone(),
            work_records: work_record_repository.clone(),
            salaries: salary_repository.clone(),
            payment_records: payment_repository.clone(),
            events: event_repository,
            tokens: token_repository,
            contracts: ContractService::new(
                contract_repository.clone(),
                workplace_repository.clone(),
            ),
            shifts: ShiftService::new(
                work_record_repository.clone(),
                contract_repository.clone(),
            ),
            generator: ShiftGeneratorService::new(
                contract_repository.clone(),
                work_record_repository.clone(),
            ),
            corrections: CorrectionService::new(
                correction_repository,
                work_record_repository.clone(),
                contract_repository.clone(),
                event_logger.clone(),
            ),
            holidays: holiday_service.clone(),
            payroll: PayrollService::new(
                contract_repository,
                workplace_repository,
                work_record_repository,
                salary_repository,
                holiday_service,
                event_logger.clone(),
                policy,
            ),
            payments: PaymentService::new(payment_repository, event_logger),
        }
    }
}
