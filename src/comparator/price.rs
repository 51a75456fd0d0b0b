//! Price cell parsing.
//!
//! Cells follow the Italian convention: `.` groups thousands, `,` separates
//! decimals and a currency symbol may appear anywhere around the number.
//! A dot is therefore never read as a decimal point: `"1.586€"` is 1586.

const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£'];

/// Parses a price cell, returning `None` for anything that is not a
/// non-negative number.
pub fn try_parse_price(raw: &str) -> Option<f64> {
    let mut normalized = String::with_capacity(raw.len());
    let mut decimal_seen = false;

    for ch in raw.chars() {
        match ch {
            '0'..='9' => normalized.push(ch),
            '.' => {}
            ',' => {
                if decimal_seen {
                    return None;
                }
                decimal_seen = true;
                normalized.push('.');
            }
            c if c.is_whitespace() || CURRENCY_SYMBOLS.contains(&c) => {}
            _ => return None,
        }
    }

    if !normalized.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Lenient variant of [`try_parse_price`]: malformed input yields `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    try_parse_price(raw).unwrap_or(0.0)
}
