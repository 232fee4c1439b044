use chrono::NaiveDate;

use fincal_core::event::RawEvent;
use fincal_core::forecast::engine::{run_forecast, ForecastOptions};
use fincal_core::forecast::view::{filter_entries, sort_entries, SortDirection, SortKey};
use fincal_core::forecast::DateWindow;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).expect("valid day")
}

fn sample_forecast() -> Vec<fincal_core::forecast::engine::ForecastEntry> {
    let credits = [RawEvent::all_day("c-1", "$2000 Paycheck", day(5))];
    let debits = [
        RawEvent::all_day("d-1", "$1200 Rent", day(1)),
        RawEvent::all_day("d-2", "$60.25 internet", day(10)),
        RawEvent::all_day("d-3", "$40 Dog food", day(10)),
    ];
    let window = DateWindow::new(day(1), day(30)).expect("window");
    run_forecast(&credits, &debits, ForecastOptions::new(4000.0, window)).expect("forecast")
}

#[test]
fn descending_balance_sort_leads_with_the_peak() {
    let entries = sample_forecast();
    let sorted = sort_entries(&entries, Some(SortKey::Balance), SortDirection::Desc);
    assert_eq!(sorted[0].summary, "Paycheck");
    assert_eq!(sorted[0].balance, 4800.0);
    assert!(sorted.windows(2).all(|pair| pair[0].balance >= pair[1].balance));
}

#[test]
fn summary_sort_ignores_case_across_a_real_run() {
    let entries = sample_forecast();
    let sorted = sort_entries(&entries, Some(SortKey::Summary), SortDirection::Asc);
    let summaries: Vec<&str> = sorted.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(
        summaries,
        ["Dog food", "internet", "Paycheck", "Rent", "Starting Balance"]
    );
}

#[test]
fn sorting_twice_gives_the_same_sequence() {
    let entries = sample_forecast();
    let once = sort_entries(&entries, Some(SortKey::Amount), SortDirection::Asc);
    let twice = sort_entries(&once, Some(SortKey::Amount), SortDirection::Asc);
    assert_eq!(once, twice);
}

#[test]
fn filter_then_sort_narrows_to_one_day() {
    let entries = sample_forecast();
    let filtered = filter_entries(&entries, "2026-09-10");
    assert_eq!(filtered.len(), 2);
    let sorted = sort_entries(&filtered, Some(SortKey::Amount), SortDirection::Asc);
    assert_eq!(sorted[0].summary, "internet");
    assert_eq!(sorted[1].summary, "Dog food");
}

#[test]
fn filter_matches_formatted_amounts() {
    let entries = sample_forecast();
    let hits = filter_entries(&entries, "60.25");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].summary, "internet");
}
