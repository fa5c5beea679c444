pub mod contract;
pub mod correction;
pub mod event;
pub mod holiday;
pub mod payment;
pub mod salary;
pub mod token;
pub mod work_record;
pub mod workplace;

pub use contract::ContractRepository;
pub use correction::CorrectionRepository;
pub use event::EventRepository;
pub use holiday::HolidayRepository;
pub use payment::PaymentRepository;
pub use salary::SalaryRepository;
pub use token::AuthTokenRepository;
pub use work_record::WorkRecordRepository;
pub use workplace::WorkplaceRepository;
