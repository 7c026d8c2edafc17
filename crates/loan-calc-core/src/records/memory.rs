//! In-memory record store. Nothing survives the process.

use std::sync::RwLock;

use super::record::SavedLoanRecord;
use super::store::{LoanRecordStore, StoreResult};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct InMemoryLoanStore {
    records: RwLock<Vec<SavedLoanRecord>>,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Lock(e.to_string())
}

impl LoanRecordStore for InMemoryLoanStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn append(&self, record: SavedLoanRecord) -> StoreResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        tracing::debug!(id = %record.id, "record appended");
        records.push(record);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<SavedLoanRecord>> {
        Ok(self.records.read().map_err(lock_error)?.clone())
    }

    fn remove(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(lock_error)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn clear(&self) -> StoreResult<()> {
        self.records.write().map_err(lock_error)?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute_schedule;
    use crate::types::{LoanCategory, LoanTerms};
    use rust_decimal_macros::dec;

    fn record(label: &str) -> SavedLoanRecord {
        let terms = LoanTerms::new(dec!(100_000), dec!(6), 24);
        let result = compute_schedule(&terms).unwrap();
        SavedLoanRecord::from_result(label, LoanCategory::Personal, &terms, &result)
    }

    #[test]
    fn test_append_list_remove_clear() {
        let store = InMemoryLoanStore::new();
        let a = record("a");
        let b = record("b");
        let a_id = a.id.clone();
        store.append(a).unwrap();
        store.append(b).unwrap();

        let labels: Vec<String> = store.list().unwrap().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["a", "b"]);

        assert!(store.remove(&a_id).unwrap());
        assert!(!store.remove(&a_id).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);

        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = InMemoryLoanStore::new();
        let a = record("a");
        store.append(a.clone()).unwrap();
        assert!(matches!(store.append(a), Err(StoreError::DuplicateId(_))));
    }
}
