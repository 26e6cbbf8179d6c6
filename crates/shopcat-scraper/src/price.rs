//! Price parsing and unit normalization.
//!
//! Storefront pages and APIs disagree on units: `products.json` and the
//! Storefront API return major units (`"129.99"`), while theme-embedded
//! product JSON commonly carries minor units (`12999`). Values above
//! [`MINOR_UNIT_THRESHOLD`] are assumed to be minor units.
//!
//! Known limitation: a genuine major-unit price above the threshold (a
//! `15000.00` item) is divided as well. The threshold is kept as-is for
//! compatibility with previously collected catalogs.

/// Prices strictly greater than this are treated as minor units.
pub const MINOR_UNIT_THRESHOLD: f64 = 10_000.0;

/// Converts a raw numeric price to major currency units.
#[must_use]
pub fn normalize_price(raw: f64) -> f64 {
    if raw > MINOR_UNIT_THRESHOLD {
        raw / 100.0
    } else {
        raw
    }
}

/// Parses a price string such as `"30.00"`, `"$1,299.00"` or `"12999"`.
///
/// Returns `None` for blank, non-numeric, negative, or non-finite input.
/// The result is not unit-normalized; pass it through [`normalize_price`].
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value = cleaned.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
