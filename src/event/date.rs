use chrono::NaiveDate;

/// Parses a provider all-day date (`YYYY-MM-DD`) into a calendar-local date.
///
/// The components are taken literally; no timezone conversion crosses the day
/// boundary. Anything but the strict ten-character form, or an impossible
/// calendar date such as month 13, yields `None`.
pub fn parse_all_day_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
