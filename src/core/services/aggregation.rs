//! Sales figures derived from the record log.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::period::Period;
use crate::record::{round_cents, Record};
use crate::time::Clock;

/// Sum of every record filed on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// `M/D`, as shown under the chart.
    pub display_date: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub period: Period,
    pub total: f64,
    /// Days in the window with at least one record.
    pub days: usize,
    /// `total / days`; `None` when no day in the window has data.
    pub average_per_day: Option<f64>,
}

/// Read-only view over a record slice pinned to a reference day.
pub struct AggregationEngine<'a> {
    records: &'a [Record],
    today: NaiveDate,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(records: &'a [Record], clock: &dyn Clock) -> Self {
        Self::as_of(records, clock.today())
    }

    pub fn as_of(records: &'a [Record], today: NaiveDate) -> Self {
        Self { records, today }
    }

    /// Per-day totals inside the trailing window, newest day first.
    pub fn daily_totals(&self, period: Period) -> Vec<DailyTotal> {
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in self
            .records
            .iter()
            .filter(|record| period.contains(self.today, record.date))
        {
            *by_day.entry(record.date).or_insert(0.0) += record.total();
        }
        by_day
            .into_iter()
            .rev()
            .map(|(date, total)| DailyTotal {
                date,
                display_date: date.format("%-m/%-d").to_string(),
                total: round_cents(total),
            })
            .collect()
    }

    pub fn summary(&self, period: Period) -> SalesSummary {
        let totals = self.daily_totals(period);
        let total = round_cents(totals.iter().map(|day| day.total).sum());
        let days = totals.len();
        let average_per_day = (days > 0).then(|| round_cents(total / days as f64));
        SalesSummary {
            period,
            total,
            days,
            average_per_day,
        }
    }
}
