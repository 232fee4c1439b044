//! Parsing of the `"$<amount> <description>"` event title encoding.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional dollar sign, optional whitespace, a non-negative amount with at
/// most two fraction digits, at least one whitespace, then the description.
static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\s*(\d+(?:\.\d{1,2})?)\s+(.*)$").unwrap());

/// Amount and free-text description extracted from an event title.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTitle {
    pub amount: f64,
    pub description: String,
}

/// Extracts the encoded amount and description from an event title.
///
/// Returns `None` for absent, empty, or unmatched titles so the caller drops
/// the event instead of treating it as a zero amount. A number-only title
/// still parses when trailing whitespace follows the amount; the description
/// is then empty, which is valid.
pub fn parse_title(title: Option<&str>) -> Option<ParsedTitle> {
    let raw = title?;
    let captures = match TITLE_PATTERN.captures(raw) {
        Some(captures) => captures,
        None => {
            tracing::debug!(title = raw, "event title did not match the amount pattern");
            return None;
        }
    };
    let amount: f64 = captures[1].parse().ok()?;
    if !amount.is_finite() {
        tracing::debug!(title = raw, "event title amount is not a finite number");
        return None;
    }
    Some(ParsedTitle {
        amount,
        description: captures[2].trim().to_string(),
    })
}

/// Renders a title in the same encoding `parse_title` consumes, so events
/// written back to a calendar stay readable by the forecast.
pub fn encode_title(amount: f64, description: &str) -> String {
    format!("${:.2} {}", amount.abs(), description)
}
