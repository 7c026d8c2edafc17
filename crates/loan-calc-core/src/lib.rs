pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "records")]
pub mod records;

pub use error::LoanCalcError;
#[cfg(feature = "records")]
pub use error::StoreError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
