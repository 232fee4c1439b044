//! Expansion of recurring transaction streams into synthetic calendar events.
//!
//! Aggregators report recurring money movements as streams (an amount, a
//! description, a frequency, and the most recent occurrence). Expanding a
//! stream produces all-day events whose titles use the same
//! `"$<amount> <description>"` encoding the title parser consumes, so
//! imported streams feed straight into a forecast.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::{title::encode_title, RawEvent};
use crate::forecast::DateWindow;

/// Occurrence cap per stream, against degenerate rules.
const MAX_OCCURRENCES: usize = 1000;

/// How often a recurring stream repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Weekly,
    Biweekly,
    /// Twice a month, approximated as the 1st and the 15th.
    SemiMonthly,
    Monthly,
    Yearly,
}

/// A recurring monetary stream as reported by an aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringStream {
    pub description: String,
    pub amount: f64,
    pub frequency: Frequency,
    /// Most recent known occurrence; expansion steps forward from here.
    pub anchor: NaiveDate,
}

impl RecurringStream {
    /// Synthetic all-day events for every occurrence inside `window`.
    pub fn expand(&self, window: DateWindow) -> Vec<RawEvent> {
        self.occurrences(window)
            .into_iter()
            .map(|date| {
                RawEvent::all_day(
                    Uuid::new_v4().to_string(),
                    encode_title(self.amount, &self.description),
                    date,
                )
            })
            .collect()
    }

    fn occurrences(&self, window: DateWindow) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = self.anchor;
        let mut steps = 0usize;
        while current <= window.end && steps < MAX_OCCURRENCES {
            if current >= window.start {
                dates.push(current);
            }
            current = self.next_occurrence(current);
            steps += 1;
        }
        dates
    }

    fn next_occurrence(&self, from: NaiveDate) -> NaiveDate {
        match self.frequency {
            Frequency::Weekly => from + Duration::weeks(1),
            Frequency::Biweekly => from + Duration::weeks(2),
            Frequency::SemiMonthly => next_semi_monthly(from),
            Frequency::Monthly => add_months(from, 1),
            Frequency::Yearly => add_months(from, 12),
        }
    }
}

fn next_semi_monthly(from: NaiveDate) -> NaiveDate {
    if from.day() < 15 {
        from.with_day(15).unwrap_or(from)
    } else {
        add_months(from, 1).with_day(1).unwrap_or(from)
    }
}

fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first| (first - Duration::days(1)).day())
        .unwrap_or(28)
}
