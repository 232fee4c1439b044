use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DateWindow;
use crate::event::{date::parse_all_day_date, title::parse_title, RawEvent};

/// Polarity of a calendar transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// One dated monetary movement derived from a raw event.
///
/// `amount` carries the polarity: positive for credits, negative for debits,
/// so the balance simulation is a plain additive fold. Transactions are built
/// here and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub when: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
}

/// Builds typed transactions from raw provider events.
///
/// Events whose title or date fails to parse are dropped, not zeroed; this is
/// deliberate product behavior, and drops only surface as diagnostics. The
/// lower window bound is re-checked because providers may return entries
/// slightly before the requested range; the upper bound is already enforced
/// by the provider query.
pub fn build_transactions(
    events: &[RawEvent],
    kind: TransactionKind,
    window: DateWindow,
) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(events.len());
    let mut dropped = 0usize;
    for event in events {
        let when = match parse_all_day_date(event.start_date()) {
            Some(when) => when,
            None => {
                dropped += 1;
                continue;
            }
        };
        if when < window.start {
            continue;
        }
        let parsed = match parse_title(event.summary.as_deref()) {
            Some(parsed) => parsed,
            None => {
                dropped += 1;
                continue;
            }
        };
        let amount = match kind {
            TransactionKind::Credit => parsed.amount,
            TransactionKind::Debit => -parsed.amount,
        };
        transactions.push(Transaction {
            when,
            amount,
            description: parsed.description,
            kind,
        });
    }
    if dropped > 0 {
        tracing::info!(dropped, ?kind, "excluded events that failed to parse");
    }
    transactions
}
