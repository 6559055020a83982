use thiserror::Error;
use uuid::Uuid;

/// Error type that captures record entry, storage, and aggregation failures.
#[derive(Debug, Error)]
pub enum LaundryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Stored records could not be read: {0}")]
    PersistenceRead(String),
    #[error("Row {index} is out of range (log has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
    #[error("Unknown field `{0}`")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, LaundryError>;
