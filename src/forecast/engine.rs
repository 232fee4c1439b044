//! The balance simulation: merges both calendars, orders transactions
//! deterministically, and replays them against the starting balance.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::{build_transactions, TransactionKind};
use super::DateWindow;
use crate::errors::ForecastError;
use crate::event::RawEvent;

/// Label carried by the synthetic starting-balance entry.
pub const STARTING_BALANCE_SUMMARY: &str = "Starting Balance";

/// Kind tag on a forecast row.
///
/// The variant order is the same-day display order: the synthetic `Initial`
/// entry sorts ahead of real transactions, and credits ahead of debits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Initial,
    Credit,
    Debit,
}

impl From<TransactionKind> for EntryKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Credit => EntryKind::Credit,
            TransactionKind::Debit => EntryKind::Debit,
        }
    }
}

/// One row of a computed forecast.
///
/// `balance` is the running total after the entry is applied;
/// `display_amount` is the unsigned magnitude shown next to it. Entries are
/// produced once per run and treated as immutable; the views reorder and
/// select copies only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastEntry {
    pub balance: f64,
    pub display_amount: f64,
    pub summary: String,
    pub when: NaiveDate,
    pub kind: EntryKind,
}

/// Where the synthetic starting-balance entry is dated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InitialEntryDate {
    /// Date the entry at the start of the forecast window.
    #[default]
    WindowStart,
    /// Date the entry one day before the first transaction, falling back to
    /// the window start for an empty forecast.
    DayBeforeFirstTransaction,
}

/// Explicit inputs for one forecast run; the engine reads no ambient state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastOptions {
    pub starting_balance: f64,
    pub window: DateWindow,
    #[serde(default)]
    pub initial_entry: InitialEntryDate,
}

impl ForecastOptions {
    pub fn new(starting_balance: f64, window: DateWindow) -> Self {
        Self {
            starting_balance,
            window,
            initial_entry: InitialEntryDate::default(),
        }
    }
}

/// Replays credit and debit calendar events against a starting balance.
///
/// Transactions from both calendars are merged, stable-sorted by date with
/// credits ahead of debits on ties, and folded into per-entry running
/// balances. The output always begins with one `Initial` entry carrying the
/// starting balance, kept first even when it shares a date with real
/// transactions. Re-running with identical inputs yields identical output.
pub fn run_forecast(
    credit_events: &[RawEvent],
    debit_events: &[RawEvent],
    options: ForecastOptions,
) -> Result<Vec<ForecastEntry>, ForecastError> {
    if !options.starting_balance.is_finite() {
        return Err(ForecastError::InvalidInput(
            "starting balance must be a finite number".into(),
        ));
    }
    // Options may have been built literally; re-validate the window here so an
    // inverted range fails the call instead of producing an empty forecast.
    let window = DateWindow::new(options.window.start, options.window.end)?;

    let mut transactions = build_transactions(credit_events, TransactionKind::Credit, window);
    transactions.extend(build_transactions(debit_events, TransactionKind::Debit, window));
    transactions.sort_by_key(|t| (t.when, EntryKind::from(t.kind)));

    let initial_date = match options.initial_entry {
        InitialEntryDate::WindowStart => window.start,
        InitialEntryDate::DayBeforeFirstTransaction => transactions
            .first()
            .map(|t| t.when - Duration::days(1))
            .unwrap_or(window.start),
    };

    let mut entries = Vec::with_capacity(transactions.len() + 1);
    entries.push(ForecastEntry {
        balance: options.starting_balance,
        display_amount: 0.0,
        summary: STARTING_BALANCE_SUMMARY.to_string(),
        when: initial_date,
        kind: EntryKind::Initial,
    });

    let mut balance = options.starting_balance;
    for transaction in &transactions {
        balance += transaction.amount;
        entries.push(ForecastEntry {
            balance,
            display_amount: transaction.amount.abs(),
            summary: transaction.description.clone(),
            when: transaction.when,
            kind: transaction.kind.into(),
        });
    }

    entries.sort_by_key(|entry| (entry.when, entry.kind));

    tracing::debug!(entries = entries.len(), "forecast computed");
    Ok(entries)
}
