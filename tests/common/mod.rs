#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use laundry_core::{
    record::{FieldValues, Record, RecordField},
    storage::JsonFileStorage,
    time::FixedClock,
    RecordStore,
};
use tempfile::TempDir;

pub const KEY: &str = "laundry_data";

pub fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).expect("valid date")
}

pub fn clock(m: u32, d: u32, hour: u32, minute: u32) -> FixedClock {
    FixedClock::at(
        date(m, d),
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time"),
    )
}

pub fn record(m: u32, d: u32, hour: u32, values: &[(RecordField, &str)]) -> Record {
    let values = values
        .iter()
        .fold(FieldValues::default(), |acc, (field, value)| {
            acc.with(*field, *value)
        });
    Record::new(date(m, d), NaiveTime::from_hms_opt(hour, 0, 0), values)
}

/// Store backed by a fresh directory. Keep the returned guard alive for the
/// duration of the test.
pub fn file_store() -> (TempDir, RecordStore) {
    let temp = TempDir::new().expect("create temp dir");
    let store = open_store(&temp);
    (temp, store)
}

pub fn open_store(temp: &TempDir) -> RecordStore {
    let storage = JsonFileStorage::new(temp.path().join("data")).expect("create json storage");
    let mut store = RecordStore::new(Box::new(storage), KEY);
    store.load();
    store
}
