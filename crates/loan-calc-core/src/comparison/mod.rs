pub mod options;

pub use options::{compare_loans, ComparisonOption, LoanComparison};
