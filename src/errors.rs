use thiserror::Error;

/// Error type that captures call-level forecast failures.
///
/// Per-event parse failures are never errors; malformed events are dropped by
/// the transaction builder and only surface as diagnostics.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
