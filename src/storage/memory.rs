use std::{collections::HashMap, io, sync::Mutex};

use crate::errors::{LaundryError, Result};

use super::BlobStorage;

/// Process-local blob store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, data: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut blobs) = storage.blobs.lock() {
            blobs.insert(key.to_string(), data.to_string());
        }
        storage
    }
}

impl BlobStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().map_err(|_| poisoned())?;
        Ok(blobs.get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        let mut blobs = self.blobs.lock().map_err(|_| poisoned())?;
        blobs.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

fn poisoned() -> LaundryError {
    LaundryError::Io(io::Error::new(
        io::ErrorKind::Other,
        "memory storage lock poisoned",
    ))
}
