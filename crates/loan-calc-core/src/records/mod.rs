pub mod file;
pub mod memory;
pub mod record;
pub mod store;

pub use file::JsonFileLoanStore;
pub use memory::InMemoryLoanStore;
pub use record::{summarize_records, SavedLoanRecord, SavedLoansSummary};
pub use store::LoanRecordStore;
