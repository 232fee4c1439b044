use chrono::NaiveDate;

use fincal_core::errors::ForecastError;
use fincal_core::event::RawEvent;
use fincal_core::forecast::engine::{run_forecast, EntryKind, ForecastOptions};
use fincal_core::forecast::DateWindow;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).expect("valid day")
}

fn window() -> DateWindow {
    DateWindow::new(day(1), day(30)).expect("window")
}

fn event(id: &str, summary: &str, d: u32) -> RawEvent {
    RawEvent::all_day(id, summary, day(d))
}

#[test]
fn paycheck_and_rent_fold_into_running_balances() {
    let credits = [event("c-1", "$2000 Paycheck", 5)];
    let debits = [event("d-1", "$500 Rent", 10)];

    let entries = run_forecast(&credits, &debits, ForecastOptions::new(4000.0, window()))
        .expect("forecast");

    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].kind, EntryKind::Initial);
    assert_eq!(entries[0].balance, 4000.0);
    assert_eq!(entries[0].display_amount, 0.0);
    assert_eq!(entries[0].when, day(1));

    assert_eq!(entries[1].kind, EntryKind::Credit);
    assert_eq!(entries[1].summary, "Paycheck");
    assert_eq!(entries[1].display_amount, 2000.0);
    assert_eq!(entries[1].balance, 6000.0);
    assert_eq!(entries[1].when, day(5));

    assert_eq!(entries[2].kind, EntryKind::Debit);
    assert_eq!(entries[2].summary, "Rent");
    assert_eq!(entries[2].display_amount, 500.0);
    assert_eq!(entries[2].balance, 5500.0);
    assert_eq!(entries[2].when, day(10));
}

#[test]
fn malformed_titles_leave_the_balance_flat() {
    let debits = [event("d-1", "Rent no amount", 10)];

    let entries =
        run_forecast(&[], &debits, ForecastOptions::new(4000.0, window())).expect("forecast");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, EntryKind::Initial);
    assert_eq!(entries[0].balance, 4000.0);
}

#[test]
fn same_day_credit_is_ordered_before_the_debit() {
    let credits = [event("c-1", "$2000 Paycheck", 12)];
    let debits = [event("d-1", "$500 Rent", 12)];

    let entries = run_forecast(&credits, &debits, ForecastOptions::new(1000.0, window()))
        .expect("forecast");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].kind, EntryKind::Credit);
    assert_eq!(entries[1].balance, 3000.0);
    assert_eq!(entries[2].kind, EntryKind::Debit);
    assert_eq!(entries[2].balance, 2500.0);
}

#[test]
fn rerunning_the_same_inputs_is_identical() {
    let credits = [
        event("c-1", "$2000 Paycheck", 5),
        event("c-2", "$2000 Paycheck", 19),
    ];
    let debits = [
        event("d-1", "$1200.50 Rent", 1),
        event("d-2", "$60.25 Internet", 10),
    ];
    let options = ForecastOptions::new(4000.0, window());

    let first = run_forecast(&credits, &debits, options).expect("first run");
    let second = run_forecast(&credits, &debits, options).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn events_before_the_window_are_excluded() {
    let window = DateWindow::new(day(10), day(30)).expect("window");
    let debits = [
        event("d-1", "$10 DayBefore", 9),
        event("d-2", "$10 OnStart", 10),
    ];

    let entries =
        run_forecast(&[], &debits, ForecastOptions::new(100.0, window)).expect("forecast");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].summary, "OnStart");
    assert_eq!(entries[1].balance, 90.0);
}

#[test]
fn inverted_window_is_rejected() {
    let options = ForecastOptions {
        starting_balance: 100.0,
        window: DateWindow {
            start: day(30),
            end: day(1),
        },
        initial_entry: Default::default(),
    };
    let err = run_forecast(&[], &[], options).expect_err("inverted window must fail");
    assert!(matches!(err, ForecastError::InvalidInput(_)));
}
