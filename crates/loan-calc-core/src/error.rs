use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanCalcError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl LoanCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a [`LoanRecordStore`](crate::records::LoanRecordStore) backend.
#[cfg(feature = "records")]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),
}

#[cfg(feature = "records")]
impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
