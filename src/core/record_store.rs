use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{LaundryError, Result};
use crate::record::{newest_first, Record, RecordId, RecordRow};
use crate::session::EditTarget;
use crate::storage::BlobStorage;

/// Outcome of reading the stored log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether anything was stored under the key.
    pub found: bool,
    pub record_count: usize,
    pub skipped_rows: usize,
    /// Set when the stored blob could not be read or decoded and the log
    /// started out empty instead.
    pub recovered: bool,
    /// Key the undecodable blob was copied to before anything overwrites it.
    pub preserved_as: Option<String>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// True when nothing stored would be lost by writing a fresh log: no blob
    /// at all, or an undecodable one that was copied aside. An explicitly
    /// stored empty list does not count.
    pub fn nothing_stored(&self) -> bool {
        !self.found || self.preserved_as.is_some()
    }
}

/// Ordered record log, kept newest first and written back in full on every
/// change.
pub struct RecordStore {
    records: Vec<Record>,
    storage: Box<dyn BlobStorage>,
    key: String,
}

impl RecordStore {
    pub fn new(storage: Box<dyn BlobStorage>, key: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &dyn BlobStorage {
        self.storage.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the in-memory log with the stored one. Missing, unreadable,
    /// or undecodable blobs leave an empty log and are reported, never raised.
    /// Rows that cannot be turned into records are skipped one by one.
    pub fn load(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        self.records = Vec::new();
        match self.storage.read(&self.key) {
            Ok(Some(data)) if !data.trim().is_empty() => {
                report.found = true;
                match serde_json::from_str::<Vec<Value>>(&data) {
                    Ok(rows) => self.load_rows(rows, &mut report),
                    Err(err) => self.recover(
                        &data,
                        LaundryError::PersistenceRead(err.to_string()),
                        &mut report,
                    ),
                }
            }
            Ok(_) => {
                debug!(key = %self.key, "no stored records");
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored records unreadable, starting empty");
                report.found = true;
                report.recovered = true;
                report.warnings.push(err.to_string());
            }
        }
        self.sort();
        report.record_count = self.records.len();
        info!(
            records = report.record_count,
            skipped = report.skipped_rows,
            "record log loaded"
        );
        report
    }

    fn load_rows(&mut self, rows: Vec<Value>, report: &mut LoadReport) {
        self.records.reserve(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match decode_row(row) {
                Ok(record) => self.records.push(record),
                Err(reason) => {
                    warn!(row = index + 1, %reason, "skipping stored row");
                    report.skipped_rows += 1;
                    report
                        .warnings
                        .push(format!("skipped row {}: {reason}", index + 1));
                }
            }
        }
    }

    /// Copies an undecodable blob to `<key>_unreadable` so a later save or
    /// seeding pass cannot destroy it.
    fn recover(&self, data: &str, reason: LaundryError, report: &mut LoadReport) {
        report.recovered = true;
        let backup = format!("{}_unreadable", self.key);
        match self.storage.write(&backup, data) {
            Ok(()) => {
                warn!(key = %self.key, %backup, %reason, "stored records undecodable, kept a copy");
                report
                    .warnings
                    .push(format!("{reason}; original kept under `{backup}`"));
                report.preserved_as = Some(backup);
            }
            Err(err) => {
                warn!(key = %self.key, %reason, error = %err, "stored records undecodable, copy failed");
                report
                    .warnings
                    .push(format!("{reason}; no copy could be kept: {err}"));
            }
        }
    }

    /// Installs `records` and persists them when the log is empty. Returns
    /// whether anything was written.
    pub fn seed_if_empty(&mut self, records: Vec<Record>) -> Result<bool> {
        if !self.records.is_empty() {
            return Ok(false);
        }
        self.records = records;
        self.sort();
        self.persist()?;
        info!(records = self.records.len(), "seeded record log");
        Ok(true)
    }

    /// Appends a new record or replaces the one the edit target names, then
    /// restores newest-first order.
    pub fn upsert(&mut self, record: Record, target: EditTarget) -> Result<RecordId> {
        let id = match target {
            EditTarget::New => {
                let id = record.id;
                self.records.push(record);
                id
            }
            EditTarget::Existing { id, .. } => {
                let index = self
                    .position(id)
                    .ok_or(LaundryError::RecordNotFound(id))?;
                self.records[index] = Record { id, ..record };
                id
            }
        };
        self.sort();
        debug!(record = %id, total = self.records.len(), "record upserted");
        Ok(id)
    }

    /// Stable sort, newest day first and later times first within a day.
    pub fn sort(&mut self) {
        self.records.sort_by(newest_first);
    }

    /// Writes the full ordered log as one blob.
    pub fn persist(&self) -> Result<()> {
        let rows: Vec<RecordRow> = self.records.iter().map(RecordRow::from_record).collect();
        let json = serde_json::to_string(&rows)?;
        self.storage.write(&self.key, &json)?;
        debug!(key = %self.key, records = rows.len(), "record log persisted");
        Ok(())
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Record at a display row.
    pub fn get(&self, index: usize) -> Result<&Record> {
        self.records.get(index).ok_or(LaundryError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn decode_row(row: Value) -> std::result::Result<Record, String> {
    let row: RecordRow = serde_json::from_value(row).map_err(|err| err.to_string())?;
    row.to_record()
        .ok_or_else(|| format!("unreadable date `{}`", row.date))
}
