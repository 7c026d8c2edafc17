pub mod purchase;
pub mod schedule;

pub use schedule::{compute_schedule, LoanResult, ScheduleEntry};
