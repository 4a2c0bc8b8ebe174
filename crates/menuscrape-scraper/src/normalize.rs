//! Field Normalizer: presentation-formatted strings to scalar values.

use std::sync::LazyLock;

use regex::Regex;

static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("valid regex"));

/// Multiplier applied to an option's cleaned price label to produce its
/// `price` field. The half-portion prices keep the raw cleaned value.
///
/// Carried over from the storefront exporter this feeds; revisit here if the
/// consumer confirms options should be priced at face value.
pub const OPTION_PRICE_MULTIPLIER: f64 = 2.0;

/// Parses a display price such as `"$1,200.00"` or `"+$0.50"` into a float.
///
/// Currency symbols, sign prefixes, thousands separators, and surrounding
/// text are dropped. Anything that does not leave a parseable number yields
/// `0.0`.
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Option prices derived from an option's price label (absent means free).
///
/// Returns `(price, half_price)`: the half-portion fields are the cleaned
/// label value, the full price applies [`OPTION_PRICE_MULTIPLIER`].
#[must_use]
pub fn option_prices(label: Option<&str>) -> (f64, f64) {
    let cleaned = label.map_or(0.0, parse_price);
    (cleaned * OPTION_PRICE_MULTIPLIER, cleaned)
}

/// First standalone five-digit run in a free-text address, or `""`.
#[must_use]
pub fn extract_postal_code(display_address: &str) -> String {
    POSTAL_RE
        .find(display_address)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Reads a selection limit from label text such as `"(Choose up to 3)"`.
///
/// All digits in the label are concatenated, mirroring how the storefront
/// labels are cleaned; no digits (or an out-of-range number) yields `0`.
#[must_use]
pub fn selection_limit(label: &str) -> u32 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u32>().unwrap_or(0)
}

/// `"monday"` → `"Monday"`: first character upper-cased, the rest lowered.
#[must_use]
pub fn capitalize_day(day: &str) -> String {
    let mut chars = day.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
