//! Persistence capability for saved loan summaries.
//!
//! The engine never touches storage itself; callers hand records to any
//! backend implementing [`LoanRecordStore`].

use super::record::SavedLoanRecord;
use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable sequence of saved loan records.
///
/// Implementations must make an appended record visible to the next
/// [`list`](LoanRecordStore::list), and reflect `remove`/`clear` immediately.
pub trait LoanRecordStore: Send + Sync {
    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Append a record. Ids must be unique within the store.
    fn append(&self, record: SavedLoanRecord) -> StoreResult<()>;

    /// All records in the order they were appended.
    fn list(&self) -> StoreResult<Vec<SavedLoanRecord>>;

    /// Delete one record. Returns `false` if no record had that id.
    fn remove(&self, id: &str) -> StoreResult<bool>;

    /// Delete every record.
    fn clear(&self) -> StoreResult<()>;
}
