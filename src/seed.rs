//! Generated sample entries for a fresh install, so the log and charts have
//! something to show before the first real shift.

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::record::{FieldValues, Record, RecordField};

/// Whole-unit ranges per amount field.
const AMOUNT_RANGES: [(RecordField, u32, u32); 6] = [
    (RecordField::Coin, 100, 500),
    (RecordField::Hopper, 50, 200),
    (RecordField::Soap, 20, 100),
    (RecordField::Vending, 30, 150),
    (RecordField::DropOffAmount1, 100, 300),
    (RecordField::DropOffAmount2, 50, 200),
];

/// Three to five entries per day from `start` through `end`, drawn from
/// random bytes.
pub fn sample_records(start: NaiveDate, end: NaiveDate) -> Vec<Record> {
    sample_records_with(start, end, |bound| {
        (Uuid::new_v4().as_u128() % u128::from(bound.max(1))) as u32
    })
}

/// Same as [`sample_records`] with a caller-provided source; `draw(n)` must
/// return a value in `0..n`.
pub fn sample_records_with(
    start: NaiveDate,
    end: NaiveDate,
    mut draw: impl FnMut(u32) -> u32,
) -> Vec<Record> {
    let mut records = Vec::new();
    let mut day = end;
    while day >= start {
        let entries = 3 + draw(3);
        for _ in 0..entries {
            let time = NaiveTime::from_hms_opt(8 + draw(12), draw(60), 0);
            let mut values = FieldValues::default();
            for (field, min, max) in AMOUNT_RANGES {
                let cents = min * 100 + draw((max - min) * 100);
                values.set(field, format!("{}.{:02}", cents / 100, cents % 100));
            }
            values.set(RecordField::DropOffCode, draw(100).to_string());
            records.push(Record::new(day, time, values));
        }
        day -= Duration::days(1);
    }
    records
}
