//! Swedish public-holiday calendar and leave-range calculator.

pub mod calendar;
pub mod error;
pub mod format;
pub mod holiday;
pub mod leave;
pub mod season;

pub use error::CoreError;
pub use holiday::{Holiday, SwedishHoliday, holidays_for_year};
pub use leave::{CalculationResult, DayInfo, HolidayScope, calculate, calculate_with};
