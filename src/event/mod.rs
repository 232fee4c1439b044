//! Raw calendar event records in the shape the event provider returns them.

pub mod date;
pub mod title;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ForecastError;

/// A single provider event. The title carries the encoded amount and
/// description; only all-day events (`start.date`) participate in a forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventStart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(
        default,
        rename = "dateTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_time: Option<String>,
}

impl RawEvent {
    /// Builds an all-day event, used by the recurring importer and tests.
    pub fn all_day(id: impl Into<String>, summary: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            summary: Some(summary.into()),
            start: Some(EventStart {
                date: Some(date.format("%Y-%m-%d").to_string()),
                date_time: None,
            }),
        }
    }

    /// The raw all-day date string, when present.
    pub fn start_date(&self) -> Option<&str> {
        self.start.as_ref().and_then(|start| start.date.as_deref())
    }
}

/// Loads a provider event list from a JSON file holding an array of events.
pub fn load_events(path: &Path) -> Result<Vec<RawEvent>, ForecastError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
