//! Spreadsheet export of the record log.

use std::{fs, io, path::Path};

use tracing::info;

use crate::errors::Result;
use crate::record::{Record, RecordRow};

/// Writes `records` as CSV with the stored column headers, in the order given.
pub fn write_csv<W: io::Write>(records: &[Record], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RecordRow::HEADERS)?;
    for record in records {
        csv.write_record(RecordRow::from_record(record).cells())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn export_csv(records: &[Record], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_csv(records, file)?;
    info!(path = %path.display(), records = records.len(), "exported record log");
    Ok(())
}
