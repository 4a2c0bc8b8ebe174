//! Payload Locator and JSON Decoder.
//!
//! The store page ships its initial data as a JSON object inside a `<script>`
//! element. The object is isolated by taking everything from the first `{`
//! to the last `}` of the script text. This assumes a single top-level object
//! dominates the text; anything the JSON parser rejects afterwards surfaces as
//! [`ScraperError::Decode`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ScraperError;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// Returns the span of `text` from its first `{` through its last `}`.
///
/// `None` when there is no opening brace, or no closing brace after it.
#[must_use]
pub fn isolate_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Isolates and parses the payload carried in a script element's text.
///
/// # Errors
///
/// Returns [`ScraperError::Decode`] if the isolated span is not valid JSON
/// (an absent span is reported the same way, as an EOF parse error).
pub fn decode_payload(script_text: &str) -> Result<Value, ScraperError> {
    let json = isolate_json(script_text).unwrap_or_default();
    serde_json::from_str(json).map_err(|e| ScraperError::Decode {
        context: "embedded store payload".to_string(),
        source: e,
    })
}

/// Finds the text of the `occurrence`-th (1-based) `<script>` element in
/// `html` whose contents contain `marker`.
///
/// This mirrors the live-page query for saved markup, where no browser is
/// available to evaluate the selector.
#[must_use]
pub fn locate_in_markup<'a>(html: &'a str, marker: &str, occurrence: usize) -> Option<&'a str> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .filter(|content| content.contains(marker))
        .nth(occurrence.checked_sub(1)?)
}

/// Locates and decodes the payload from saved page markup.
///
/// # Errors
///
/// - [`ScraperError::MarkerNotInMarkup`] if no matching script exists.
/// - [`ScraperError::Decode`] if the script text does not hold valid JSON.
pub fn decode_from_markup(
    html: &str,
    marker: &str,
    occurrence: usize,
) -> Result<Value, ScraperError> {
    let script = locate_in_markup(html, marker, occurrence).ok_or_else(|| {
        ScraperError::MarkerNotInMarkup {
            marker: marker.to_string(),
            occurrence,
        }
    })?;
    decode_payload(script)
}
