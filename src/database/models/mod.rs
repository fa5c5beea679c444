pub mod contract;
pub mod correction;
pub mod event;
pub mod holiday;
pub(crate) mod macros;
pub mod payment;
pub mod salary;
pub mod token;
pub mod work_record;
pub mod workplace;

// Re-export all models for easy importing
pub use contract::*;
pub use correction::*;
pub use event::*;
pub use holiday::*;
pub use payment::*;
pub use salary::*;
pub use token::*;
pub use work_record::*;
pub use workplace::*;
