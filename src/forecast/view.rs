//! Pure sorting and filtering over a computed forecast. Neither function
//! mutates its input; both hand back fresh sequences for the table view.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::engine::{EntryKind, ForecastEntry};

/// Column a forecast table can be ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    When,
    Summary,
    Amount,
    Balance,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Signed amount used for ordering: debits weigh negative so an amount sort
/// reflects cash-flow direction rather than magnitude.
fn signed_amount(entry: &ForecastEntry) -> f64 {
    match entry.kind {
        EntryKind::Debit => -entry.display_amount,
        EntryKind::Credit | EntryKind::Initial => entry.display_amount,
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare_summary(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Returns a reordered copy of `entries`.
///
/// Without a key the fallback is ascending date order, ignoring `direction`.
/// Equal keys preserve the input order, so repeated sorts are reproducible.
pub fn sort_entries(
    entries: &[ForecastEntry],
    key: Option<SortKey>,
    direction: SortDirection,
) -> Vec<ForecastEntry> {
    let mut sorted = entries.to_vec();
    let Some(key) = key else {
        sorted.sort_by_key(|entry| entry.when);
        return sorted;
    };
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::When => a.when.cmp(&b.when),
            SortKey::Summary => compare_summary(&a.summary, &b.summary),
            SortKey::Amount => compare_f64(signed_amount(a), signed_amount(b)),
            SortKey::Balance => compare_f64(a.balance, b.balance),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Case-insensitive substring filter over the summary, the display forms of
/// amount and balance, and the ISO date of each entry. An empty or
/// whitespace-only query returns every entry.
pub fn filter_entries(entries: &[ForecastEntry], query: &str) -> Vec<ForecastEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.summary.to_lowercase().contains(&needle)
                || entry.display_amount.to_string().contains(&needle)
                || format!("{:.2}", entry.display_amount).contains(&needle)
                || entry.balance.to_string().contains(&needle)
                || format!("{:.2}", entry.balance).contains(&needle)
                || entry.when.format("%Y-%m-%d").to_string().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn entry(summary: &str, d: u32, amount: f64, balance: f64, kind: EntryKind) -> ForecastEntry {
        ForecastEntry {
            balance,
            display_amount: amount,
            summary: summary.into(),
            when: day(d),
            kind,
        }
    }

    fn sample() -> Vec<ForecastEntry> {
        vec![
            entry("Starting Balance", 1, 0.0, 4000.0, EntryKind::Initial),
            entry("Paycheck", 5, 2000.0, 6000.0, EntryKind::Credit),
            entry("rent", 10, 500.0, 5500.0, EntryKind::Debit),
            entry("Dog food", 10, 40.0, 5460.0, EntryKind::Debit),
        ]
    }

    #[test]
    fn no_key_falls_back_to_ascending_date() {
        let mut shuffled = sample();
        shuffled.reverse();
        let sorted = sort_entries(&shuffled, None, SortDirection::Desc);
        let by_when = sort_entries(&shuffled, Some(SortKey::When), SortDirection::Asc);
        assert_eq!(sorted, by_when);
        assert_eq!(sorted[0].summary, "Starting Balance");
    }

    #[test]
    fn amount_sort_uses_signed_values() {
        let sorted = sort_entries(&sample(), Some(SortKey::Amount), SortDirection::Asc);
        // Debits weigh negative: -500, -40, 0, +2000.
        let summaries: Vec<&str> = sorted.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["rent", "Dog food", "Starting Balance", "Paycheck"]);
    }

    #[test]
    fn summary_sort_is_case_insensitive_and_repeatable() {
        let once = sort_entries(&sample(), Some(SortKey::Summary), SortDirection::Asc);
        let twice = sort_entries(&once, Some(SortKey::Summary), SortDirection::Asc);
        assert_eq!(once, twice);
        let summaries: Vec<&str> = once.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["Dog food", "Paycheck", "rent", "Starting Balance"]);
    }

    #[test]
    fn sort_does_not_mutate_the_input() {
        let input = sample();
        let _ = sort_entries(&input, Some(SortKey::Balance), SortDirection::Desc);
        assert_eq!(input, sample());
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        let sorted = sort_entries(&sample(), Some(SortKey::When), SortDirection::Asc);
        let day10: Vec<&str> = sorted
            .iter()
            .filter(|e| e.when == day(10))
            .map(|e| e.summary.as_str())
            .collect();
        assert_eq!(day10, ["rent", "Dog food"]);
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(filter_entries(&sample(), ""), sample());
        assert_eq!(filter_entries(&sample(), "   "), sample());
    }

    #[test]
    fn filter_matches_summary_case_insensitively() {
        let hits = filter_entries(&sample(), "RENT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].summary, "rent");
    }

    #[test]
    fn filter_matches_amount_balance_and_iso_date() {
        assert_eq!(filter_entries(&sample(), "2000").len(), 1);
        assert_eq!(filter_entries(&sample(), "5460").len(), 1);
        let by_date = filter_entries(&sample(), "2026-09-10");
        assert_eq!(by_date.len(), 2);
    }
}
