use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::{amount::parse_amount, field::RecordField};

/// Opaque identity handed out for the lifetime of a session. Row positions
/// change on every re-sort, so edits always target an id.
pub type RecordId = Uuid;

/// Field text as entered on the keypad. `None` means the field was never
/// filled in, which is distinct from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub coin: Option<String>,
    pub hopper: Option<String>,
    pub soap: Option<String>,
    pub vending: Option<String>,
    pub drop_off_amount_1: Option<String>,
    pub drop_off_code: Option<String>,
    pub drop_off_amount_2: Option<String>,
}

impl FieldValues {
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Stores `value`, treating blank text as absent.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        *self.slot_mut(field) = if value.is_empty() { None } else { Some(value) };
    }

    pub fn is_empty(&self) -> bool {
        RecordField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    /// Sum of all seven fields through the tolerant amount parser.
    pub fn total(&self) -> f64 {
        RecordField::ALL
            .iter()
            .filter_map(|field| self.get(*field))
            .map(parse_amount)
            .sum()
    }

    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    fn slot(&self, field: RecordField) -> &Option<String> {
        match field {
            RecordField::Coin => &self.coin,
            RecordField::Hopper => &self.hopper,
            RecordField::Soap => &self.soap,
            RecordField::Vending => &self.vending,
            RecordField::DropOffAmount1 => &self.drop_off_amount_1,
            RecordField::DropOffCode => &self.drop_off_code,
            RecordField::DropOffAmount2 => &self.drop_off_amount_2,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut Option<String> {
        match field {
            RecordField::Coin => &mut self.coin,
            RecordField::Hopper => &mut self.hopper,
            RecordField::Soap => &mut self.soap,
            RecordField::Vending => &mut self.vending,
            RecordField::DropOffAmount1 => &mut self.drop_off_amount_1,
            RecordField::DropOffCode => &mut self.drop_off_code,
            RecordField::DropOffAmount2 => &mut self.drop_off_amount_2,
        }
    }
}

/// One transaction entry in the daily log.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub date: NaiveDate,
    /// Legacy rows may carry only a calendar day.
    pub time: Option<NaiveTime>,
    pub values: FieldValues,
}

impl Record {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, values: FieldValues) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            time,
            values,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.total()
    }

    /// Compares everything except the session-scoped id.
    pub fn same_entry(&self, other: &Record) -> bool {
        self.date == other.date && self.time == other.time && self.values == other.values
    }
}

/// Reverse-chronological order: newer days first, later times first within a
/// day, and untimed rows after timed rows of the same day.
pub fn newest_first(a: &Record, b: &Record) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.time.cmp(&a.time))
}
