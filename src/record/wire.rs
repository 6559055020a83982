//! Stored row layout: a flat JSON object keyed by column label, with the
//! day and clock time joined into a single `Date` string such as
//! `"4/5/2025 10:35 PM"`.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{
    field::RecordField,
    record::{FieldValues, Record},
};

pub const DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const TIME_FORMAT: &str = "%I:%M %p";

const DATE_INPUT_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];
const TIME_INPUT_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Date", default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(rename = "Coin", default, deserialize_with = "lenient_text")]
    pub coin: String,
    #[serde(rename = "Hopper", default, deserialize_with = "lenient_text")]
    pub hopper: String,
    #[serde(rename = "Soap", default, deserialize_with = "lenient_text")]
    pub soap: String,
    #[serde(rename = "Vending", default, deserialize_with = "lenient_text")]
    pub vending: String,
    #[serde(rename = "Drop Off Amount 1", default, deserialize_with = "lenient_text")]
    pub drop_off_amount_1: String,
    #[serde(rename = "Drop Off Code", default, deserialize_with = "lenient_text")]
    pub drop_off_code: String,
    #[serde(rename = "Drop Off Amount 2", default, deserialize_with = "lenient_text")]
    pub drop_off_amount_2: String,
}

impl RecordRow {
    /// Column order used for stored rows and exports.
    pub const HEADERS: [&'static str; 8] = [
        "Date",
        "Coin",
        "Hopper",
        "Soap",
        "Vending",
        "Drop Off Amount 1",
        "Drop Off Code",
        "Drop Off Amount 2",
    ];

    pub fn from_record(record: &Record) -> Self {
        let text = |field| record.values.get(field).unwrap_or_default().to_string();
        Self {
            date: format_timestamp(record.date, record.time),
            coin: text(RecordField::Coin),
            hopper: text(RecordField::Hopper),
            soap: text(RecordField::Soap),
            vending: text(RecordField::Vending),
            drop_off_amount_1: text(RecordField::DropOffAmount1),
            drop_off_code: text(RecordField::DropOffCode),
            drop_off_amount_2: text(RecordField::DropOffAmount2),
        }
    }

    /// Rebuilds a record with a fresh id. Returns `None` when the day cannot be
    /// read; an unreadable clock time is dropped.
    pub fn to_record(&self) -> Option<Record> {
        let (date, time) = parse_timestamp(&self.date)?;
        let values = FieldValues::default()
            .with(RecordField::Coin, self.coin.as_str())
            .with(RecordField::Hopper, self.hopper.as_str())
            .with(RecordField::Soap, self.soap.as_str())
            .with(RecordField::Vending, self.vending.as_str())
            .with(RecordField::DropOffAmount1, self.drop_off_amount_1.as_str())
            .with(RecordField::DropOffCode, self.drop_off_code.as_str())
            .with(RecordField::DropOffAmount2, self.drop_off_amount_2.as_str());
        Some(Record::new(date, time, values))
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            self.date.as_str(),
            self.coin.as_str(),
            self.hopper.as_str(),
            self.soap.as_str(),
            self.vending.as_str(),
            self.drop_off_amount_1.as_str(),
            self.drop_off_code.as_str(),
            self.drop_off_amount_2.as_str(),
        ]
    }
}

/// Cells are written as strings, but hand-edited blobs may carry numbers or
/// nulls. Those read as their text form, or as blank.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn format_timestamp(date: NaiveDate, time: Option<NaiveTime>) -> String {
    match time {
        Some(time) => format!("{} {}", format_date(date), format_time(time)),
        None => format_date(date),
    }
}

/// Two-digit years land in 1950-2049 like the browser's date parser; other
/// years below 1000 are rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let date = DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())?;
    match date.year() {
        year @ 0..=49 => date.with_year(year + 2000),
        year @ 50..=99 => date.with_year(year + 1900),
        year if year < 1000 => None,
        _ => Some(date),
    }
}

pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(input, format).ok())
}

/// Splits `"<day> <time>"`. Browser locales may separate the meridiem with a
/// narrow or non-breaking space, so those are normalised first.
pub fn parse_timestamp(input: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let normalized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '\u{a0}' | '\u{202f}' => ' ',
            other => other,
        })
        .collect();
    match normalized.split_once(' ') {
        Some((day, time)) => Some((parse_date(day)?, parse_time(time))),
        None => Some((parse_date(&normalized)?, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_the_dashboard() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_timestamp(date, Some(time)), "4/5/2025 09:05 AM");
        assert_eq!(format_timestamp(date, None), "4/5/2025");
    }

    #[test]
    fn parses_legacy_and_locale_variants() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        assert_eq!(
            parse_timestamp("4/5/2025 10:35 PM"),
            Some((date, NaiveTime::from_hms_opt(22, 35, 0)))
        );
        assert_eq!(
            parse_timestamp("04/05/2025 10:35\u{202f}PM"),
            Some((date, NaiveTime::from_hms_opt(22, 35, 0)))
        );
        assert_eq!(parse_timestamp("2025-04-05"), Some((date, None)));
        assert_eq!(parse_timestamp("4/5/2025 later"), Some((date, None)));
        assert_eq!(parse_timestamp("yesterday 10:35 PM"), None);
    }

    #[test]
    fn rows_use_the_stored_keys() {
        let row = RecordRow {
            date: "4/5/2025 10:35 PM".into(),
            coin: "50".into(),
            ..RecordRow::default()
        };
        let json = serde_json::to_value(&row).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for header in RecordRow::HEADERS {
            assert!(keys.iter().any(|key| key == header), "missing {header}");
        }
        assert_eq!(keys.len(), RecordRow::HEADERS.len());
    }

    #[test]
    fn missing_keys_read_as_blank() {
        let row: RecordRow = serde_json::from_str(r#"{"Date":"4/1/2025","Soap":"3"}"#).unwrap();
        let record = row.to_record().unwrap();
        assert_eq!(record.values.get(RecordField::Soap), Some("3"));
        assert!(record.values.get(RecordField::Coin).is_none());
        assert!(record.time.is_none());
    }

    #[test]
    fn numeric_and_null_cells_read_as_text() {
        let row: RecordRow =
            serde_json::from_str(r#"{"Date":"4/3/2025 10:00 AM","Coin":50,"Hopper":2.5,"Soap":null}"#)
                .unwrap();
        assert_eq!(row.coin, "50");
        assert_eq!(row.hopper, "2.5");
        assert_eq!(row.soap, "");
        let record = row.to_record().unwrap();
        assert_eq!(record.total(), 52.5);
    }

    #[test]
    fn short_years_follow_the_browser_and_tiny_years_are_rejected() {
        assert_eq!(parse_date("4/5/25"), NaiveDate::from_ymd_opt(2025, 4, 5));
        assert_eq!(parse_date("4/5/99"), NaiveDate::from_ymd_opt(1999, 4, 5));
        assert_eq!(parse_date("4/5/0999"), None);
        assert_eq!(
            parse_timestamp("4/5/25 10:35 PM").map(|(date, _)| date),
            NaiveDate::from_ymd_opt(2025, 4, 5)
        );
    }
}
