//! Keypad-driven form state.
//!
//! The session accumulates typed text per field, remembers which field the
//! keypad is writing into, and knows whether a save creates a new record or
//! rewrites an existing one.

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::{
    errors::{LaundryError, Result},
    record::{FieldValues, Record, RecordField, RecordId},
    time::Clock,
};

/// Keys on the entry keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    DecimalPoint,
    Delete,
    Clear,
}

impl Key {
    /// Maps keypad captions (`0`-`9`, `.`, `Del`, `Clr`) to keys.
    pub fn from_label(label: &str) -> Option<Key> {
        match label.trim().to_ascii_lowercase().as_str() {
            "." => Some(Key::DecimalPoint),
            "del" | "delete" => Some(Key::Delete),
            "clr" | "clear" => Some(Key::Clear),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(Key::Digit(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    FieldSelected(RecordField),
}

/// What a save will do with the form contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    #[default]
    New,
    /// Rewrites the record with this id, keeping its original clock time.
    Existing {
        id: RecordId,
        time: Option<NaiveTime>,
    },
}

/// Candidate produced by a successful commit, ready for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub record: Record,
    pub target: EditTarget,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSession {
    selected: Option<RecordField>,
    values: FieldValues,
    date: Option<NaiveDate>,
    target: EditTarget,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match self.selected {
            Some(field) => SessionState::FieldSelected(field),
            None => SessionState::Idle,
        }
    }

    pub fn selected_field(&self) -> Option<RecordField> {
        self.selected
    }

    pub fn value(&self, field: RecordField) -> &str {
        self.values.get(field).unwrap_or_default()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Day the next save will be filed under, if one was set or loaded.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn edit_target(&self) -> EditTarget {
        self.target
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.target, EditTarget::Existing { .. })
    }

    pub fn select_field(&mut self, field: RecordField) {
        self.selected = Some(field);
    }

    /// Selects a field by label or short name. Unknown names leave the
    /// selection untouched and return `false`.
    pub fn select_field_named(&mut self, name: &str) -> bool {
        match name.parse::<RecordField>() {
            Ok(field) => {
                self.select_field(field);
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => self.press_digit(digit),
            Key::DecimalPoint => self.press_decimal_point(),
            Key::Delete => self.press_delete(),
            Key::Clear => self.press_clear(),
        }
    }

    /// Appends a digit to the selected field. Ignored with no selection or a
    /// non-digit character.
    pub fn press_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        self.edit_selected(|text| text.push(digit));
    }

    /// Appends `.` unless the selected field already has one.
    pub fn press_decimal_point(&mut self) {
        self.edit_selected(|text| {
            if !text.contains('.') {
                text.push('.');
            }
        });
    }

    pub fn press_delete(&mut self) {
        self.edit_selected(|text| {
            text.pop();
        });
    }

    /// Discards every field, the selection, the chosen day, and any edit target.
    pub fn press_clear(&mut self) {
        *self = Self::default();
    }

    /// Loads a record into the form for editing. The record's clock time is
    /// held back and reapplied on save.
    pub fn begin_edit(&mut self, record: &Record) {
        self.values = record.values.clone();
        self.date = Some(record.date);
        self.target = EditTarget::Existing {
            id: record.id,
            time: record.time,
        };
        debug!(record = %record.id, "editing record");
    }

    /// Turns the form into a record and resets to idle. Fails without touching
    /// the session when every field is blank.
    pub fn commit(&mut self, clock: &dyn Clock) -> Result<Commit> {
        if self.values.is_empty() {
            return Err(LaundryError::Validation("nothing to save".into()));
        }
        let date = self.date.unwrap_or_else(|| clock.today());
        let record = match self.target {
            EditTarget::New => Record::new(date, Some(clock.time_of_day()), self.values.clone()),
            EditTarget::Existing { id, time } => Record {
                id,
                date,
                time,
                values: self.values.clone(),
            },
        };
        let commit = Commit {
            record,
            target: self.target,
        };
        self.press_clear();
        Ok(commit)
    }

    fn edit_selected(&mut self, apply: impl FnOnce(&mut String)) {
        let Some(field) = self.selected else {
            return;
        };
        let mut text = self.value(field).to_string();
        apply(&mut text);
        self.values.set(field, text);
    }
}
