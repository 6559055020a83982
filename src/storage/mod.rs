//! Key-value blob persistence for the record log.

pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Abstraction over a store of named text blobs. A write replaces the whole
/// blob in one step; readers never see a partially written value.
pub trait BlobStorage: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when nothing was written yet.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
