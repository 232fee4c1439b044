//! Weekly calendar bands: partitioning a forecast into rendered weeks and
//! deriving the drawing data the calendar view consumes, as Y-axis scale
//! bounds, step-function waypoints, and a zero-crossing color split.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::engine::ForecastEntry;
use super::DateWindow;

const SCALE_PADDING: f64 = 0.1;
const ENVELOPE_RADIUS_DAYS: i64 = 15;
const SMOOTHING_RADIUS_DAYS: i64 = 7;

/// Range rendered when the forecast has no entries at all.
const EMPTY_SCALE: ScaleBounds = ScaleBounds {
    min: 0.0,
    max: 100.0,
};

/// First day of a rendered week.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    fn days_into_week(self, date: NaiveDate) -> i64 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday() as i64,
            WeekStart::Monday => date.weekday().num_days_from_monday() as i64,
        }
    }

    /// Snaps a date back to the most recent week boundary.
    pub fn snap(self, date: NaiveDate) -> NaiveDate {
        date - Duration::days(self.days_into_week(date))
    }
}

/// One rendered calendar week with the forecast entries that fall inside it.
///
/// `start_balance` is the carry-forward balance at the week boundary: the
/// balance of the last entry dated at or before `start`, never interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBand {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: [NaiveDate; 7],
    pub transactions: Vec<ForecastEntry>,
    pub start_balance: f64,
}

impl WeekBand {
    /// Entries dated on a specific day cell of this week.
    pub fn entries_on(&self, day: NaiveDate) -> Vec<&ForecastEntry> {
        self.transactions
            .iter()
            .filter(|entry| entry.when == day)
            .collect()
    }

    /// Balance after the last entry of each day, `None` for quiet days.
    pub fn day_end_balances(&self) -> [Option<f64>; 7] {
        let mut balances = [None; 7];
        for (slot, day) in balances.iter_mut().zip(self.days) {
            *slot = self
                .transactions
                .iter()
                .filter(|entry| entry.when == day)
                .last()
                .map(|entry| entry.balance);
        }
        balances
    }
}

/// Partitions a forecast into calendar weeks covering `window`, snapped
/// outward to the configured week boundary. Week membership is inclusive on
/// both boundary days.
pub fn build_weeks(
    entries: &[ForecastEntry],
    week_start: WeekStart,
    window: DateWindow,
) -> Vec<WeekBand> {
    let first = week_start.snap(window.start);
    let last = week_start.snap(window.end);
    let mut weeks = Vec::new();
    let mut start = first;
    while start <= last {
        let end = start + Duration::days(6);
        let mut days = [start; 7];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = start + Duration::days(offset as i64);
        }
        let transactions: Vec<ForecastEntry> = entries
            .iter()
            .filter(|entry| entry.when >= start && entry.when <= end)
            .cloned()
            .collect();
        weeks.push(WeekBand {
            start,
            end,
            days,
            transactions,
            start_balance: balance_at(entries, start),
        });
        start += Duration::days(7);
    }
    weeks
}

/// Carry-forward balance lookup over entries sorted by date: the balance of
/// the last entry at or before `date`, the first entry's balance when none
/// precede it, or zero for an empty forecast.
fn balance_at(entries: &[ForecastEntry], date: NaiveDate) -> f64 {
    let mut last = match entries.first() {
        Some(first) => first.balance,
        None => return 0.0,
    };
    for entry in entries {
        if entry.when > date {
            break;
        }
        last = entry.balance;
    }
    last
}

/// Rendered Y-axis range for a week band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    fn padded(min: f64, max: f64) -> Self {
        let padding = (max - min) * SCALE_PADDING;
        Self {
            min: min - padding,
            max: max + padding,
        }
    }

    fn union(self, other: ScaleBounds) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Normalized position of a balance inside the range, 0 at `min` and 1 at
    /// `max`; a degenerate range centers everything.
    pub fn normalize(&self, balance: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        (balance - self.min) / range
    }

    /// Fraction of the band height at which the balance crosses zero, clamped
    /// to [0, 1] when zero lies outside the range. Drives the credit/debit
    /// color split; derived on demand, never stored.
    pub fn zero_fraction(&self) -> f64 {
        self.normalize(0.0).clamp(0.0, 1.0)
    }
}

/// Y-axis scaling strategy for the weekly bands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleStrategy {
    /// One padded min/max over the whole forecast, shared by every week.
    #[default]
    Global,
    /// Per-day rolling min/max envelope over a daily carry-forward series,
    /// smoothed by a running average; weeks look up their start day.
    Smoothed,
}

/// Precomputed Y-axis scale for one forecast window.
#[derive(Debug, Clone)]
pub struct BandScale {
    strategy: ScaleStrategy,
    global: ScaleBounds,
    window_start: NaiveDate,
    daily: Vec<ScaleBounds>,
}

impl BandScale {
    pub fn new(entries: &[ForecastEntry], strategy: ScaleStrategy, window: DateWindow) -> Self {
        let global = global_bounds(entries);
        let daily = match strategy {
            ScaleStrategy::Global => Vec::new(),
            ScaleStrategy::Smoothed => smoothed_daily_bounds(entries, window),
        };
        Self {
            strategy,
            global,
            window_start: window.start,
            daily,
        }
    }

    fn base_bounds(&self, week_start: NaiveDate) -> ScaleBounds {
        match self.strategy {
            ScaleStrategy::Global => self.global,
            ScaleStrategy::Smoothed => {
                if self.daily.is_empty() {
                    return self.global;
                }
                let offset = (week_start - self.window_start).num_days();
                let index = offset.clamp(0, self.daily.len() as i64 - 1) as usize;
                self.daily[index]
            }
        }
    }

    /// Rendered range for a week: the strategy's bounds widened to cover the
    /// week's own padded local extremes, so no transaction is clipped.
    pub fn bounds_for(&self, week: &WeekBand) -> ScaleBounds {
        self.base_bounds(week.start).union(local_bounds(week))
    }
}

fn global_bounds(entries: &[ForecastEntry]) -> ScaleBounds {
    if entries.is_empty() {
        return EMPTY_SCALE;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for entry in entries {
        min = min.min(entry.balance);
        max = max.max(entry.balance);
    }
    ScaleBounds::padded(min, max)
}

fn local_bounds(week: &WeekBand) -> ScaleBounds {
    let mut min = week.start_balance;
    let mut max = week.start_balance;
    for entry in &week.transactions {
        min = min.min(entry.balance);
        max = max.max(entry.balance);
    }
    ScaleBounds::padded(min, max)
}

/// Daily carry-forward series over the window, a ±15-day min/max envelope per
/// day, then a ±7-day running average of that envelope, each day padded.
fn smoothed_daily_bounds(entries: &[ForecastEntry], window: DateWindow) -> Vec<ScaleBounds> {
    let days = (window.end - window.start).num_days() + 1;
    if days <= 0 || entries.is_empty() {
        return Vec::new();
    }
    let series: Vec<f64> = (0..days)
        .map(|offset| balance_at(entries, window.start + Duration::days(offset)))
        .collect();

    let envelope: Vec<(f64, f64)> = (0..series.len() as i64)
        .map(|day| {
            let lo = (day - ENVELOPE_RADIUS_DAYS).max(0) as usize;
            let hi = ((day + ENVELOPE_RADIUS_DAYS) as usize).min(series.len() - 1);
            let slice = &series[lo..=hi];
            let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
            let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (min, max)
        })
        .collect();

    (0..envelope.len() as i64)
        .map(|day| {
            let lo = (day - SMOOTHING_RADIUS_DAYS).max(0) as usize;
            let hi = ((day + SMOOTHING_RADIUS_DAYS) as usize).min(envelope.len() - 1);
            let span = &envelope[lo..=hi];
            let count = span.len() as f64;
            let min = span.iter().map(|(min, _)| *min).sum::<f64>() / count;
            let max = span.iter().map(|(_, max)| *max).sum::<f64>() / count;
            ScaleBounds::padded(min, max)
        })
        .collect()
}

/// One point of a week's step-function path; `x` is the fraction of the
/// week's width, 0 at the week start and 1 at its end. The visualization
/// layer maps waypoints to drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub balance: f64,
}

/// Builds the step-function waypoints for one week: flat at the running
/// balance until a transaction's position, same-day transactions spaced
/// evenly inside their day, a vertical step to each post-balance, then flat
/// carry to the week's end.
pub fn path_waypoints(week: &WeekBand) -> Vec<PathPoint> {
    let mut points = vec![PathPoint {
        x: 0.0,
        balance: week.start_balance,
    }];
    let mut balance = week.start_balance;
    for (day_index, day) in week.days.iter().enumerate() {
        let day_transactions = week.entries_on(*day);
        let day_start = day_index as f64 / 7.0;
        let day_end = (day_index + 1) as f64 / 7.0;
        let spacing = (day_end - day_start) / (day_transactions.len() + 1) as f64;
        for (slot, entry) in day_transactions.iter().enumerate() {
            let x = day_start + (slot + 1) as f64 * spacing;
            points.push(PathPoint { x, balance });
            points.push(PathPoint {
                x,
                balance: entry.balance,
            });
            balance = entry.balance;
        }
        points.push(PathPoint {
            x: day_end,
            balance,
        });
    }
    points
}
