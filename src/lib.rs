#![doc(test(attr(deny(warnings))))]

//! Fincal Core turns two calendars of title-encoded monetary events into a
//! running balance forecast, with sortable table rows and weekly calendar
//! bands derived from the same simulation.

pub mod cli;
pub mod config;
pub mod errors;
pub mod event;
pub mod forecast;
pub mod import;
pub mod utils;

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    utils::init_tracing();
    tracing::info!("Fincal tracing initialized.");
}
