//! The forecast pipeline: typed transactions, the balance simulation, and the
//! table and calendar views derived from it.

pub mod calendar;
pub mod engine;
pub mod transaction;
pub mod view;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ForecastError;

/// Inclusive date range a forecast is computed over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// A single-day window (`end == start`) is allowed; an inverted one is
    /// rejected.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ForecastError> {
        if end < start {
            return Err(ForecastError::InvalidInput(
                "window end must not be before its start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Window beginning today or tomorrow relative to `reference`, matching
    /// the "start forecast from tomorrow" toggle.
    pub fn from_reference(
        reference: NaiveDate,
        end: NaiveDate,
        start_tomorrow: bool,
    ) -> Result<Self, ForecastError> {
        let start = if start_tomorrow {
            reference + Duration::days(1)
        } else {
            reference
        };
        Self::new(start, end)
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ForecastError;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    #[test]
    fn rejects_inverted_window() {
        let err = DateWindow::new(day(10), day(9)).expect_err("inverted window must fail");
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }

    #[test]
    fn single_day_window_is_valid_and_inclusive() {
        let window = DateWindow::new(day(10), day(10)).expect("window");
        assert!(window.contains(day(10)));
        assert!(!window.contains(day(9)));
        assert!(!window.contains(day(11)));
    }

    #[test]
    fn from_reference_shifts_start_by_one_day() {
        let window = DateWindow::from_reference(day(1), day(30), true).expect("window");
        assert_eq!(window.start, day(2));
        let window = DateWindow::from_reference(day(1), day(30), false).expect("window");
        assert_eq!(window.start, day(1));
    }
}
