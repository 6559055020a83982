use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LaundryError;

/// Trailing window the sales widgets summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::Year];

    /// First day inside the window ending on `today`. Month and year steps
    /// clamp to the last day of a shorter month.
    pub fn window_start(self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => today - Duration::days(7),
            Period::Month => shift_month(today, -1),
            Period::Year => shift_year(today, -1),
        }
    }

    pub fn contains(self, today: NaiveDate, date: NaiveDate) -> bool {
        date >= self.window_start(today) && date <= today
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Period {
    type Err = LaundryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Period::Week),
            "month" | "monthly" | "m" => Ok(Period::Month),
            "year" | "yearly" | "y" => Ok(Period::Year),
            _ => Err(LaundryError::Validation(format!(
                "unknown period `{input}` (use week, month, or year)"
            ))),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_starts() {
        let today = date(2025, 3, 31);
        assert_eq!(Period::Week.window_start(today), date(2025, 3, 24));
        assert_eq!(Period::Month.window_start(today), date(2025, 2, 28));
        assert_eq!(Period::Year.window_start(date(2024, 2, 29)), date(2023, 2, 28));
        assert_eq!(Period::Month.window_start(date(2025, 1, 15)), date(2024, 12, 15));
    }

    #[test]
    fn window_is_inclusive_and_excludes_future_days() {
        let today = date(2025, 4, 10);
        assert!(Period::Week.contains(today, date(2025, 4, 3)));
        assert!(Period::Week.contains(today, today));
        assert!(!Period::Week.contains(today, date(2025, 4, 2)));
        assert!(!Period::Week.contains(today, date(2025, 4, 11)));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Month".parse::<Period>().unwrap(), Period::Month);
        assert!("decade".parse::<Period>().is_err());
    }
}
