//! JSON-file record store.
//!
//! The whole store is one JSON array. Every mutation rewrites it through a
//! temporary sibling file and a rename, so readers never see a torn file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::record::SavedLoanRecord;
use super::store::{LoanRecordStore, StoreResult};
use crate::error::StoreError;

#[derive(Debug)]
pub struct JsonFileLoanStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLoanStore {
    /// Open a store backed by `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoreResult<Vec<SavedLoanRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, records: &[SavedLoanRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_string_pretty(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut Vec<SavedLoanRecord>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        let mut records = self.read_all()?;
        let out = f(&mut records)?;
        self.write_all(&records)?;
        Ok(out)
    }
}

impl LoanRecordStore for JsonFileLoanStore {
    fn backend_name(&self) -> &'static str {
        "json_file"
    }

    fn append(&self, record: SavedLoanRecord) -> StoreResult<()> {
        self.modify(|records| {
            if records.iter().any(|r| r.id == record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            tracing::debug!(id = %record.id, path = %self.path.display(), "record appended");
            records.push(record);
            Ok(())
        })
    }

    fn list(&self) -> StoreResult<Vec<SavedLoanRecord>> {
        self.read_all()
    }

    fn remove(&self, id: &str) -> StoreResult<bool> {
        self.modify(|records| {
            let before = records.len();
            records.retain(|r| r.id != id);
            Ok(records.len() != before)
        })
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "store cleared");
        self.write_all(&[])
    }
}
