pub mod contracts;
pub mod corrections;
pub mod events;
pub mod holidays;
pub mod payments;
pub mod payroll;
pub mod shift_generator;
pub mod shifts;

pub use contracts::ContractService;
pub use corrections::CorrectionService;
pub use events::EventLogger;
pub use holidays::{HolidayService, HolidaySource, JsonHolidaySource};
pub use payments::{PaymentService, SweepOutcome};
pub use payroll::PayrollService;
pub use shift_generator::{HorizonOutcome, ShiftGeneratorService};
pub use shifts::ShiftService;
