//! Number formatting for chapter counts
//!
//! Chapter numbers come from the API as floats (`12.5` exists, and summing or
//! subtracting them leaves floating-point noise), so they are rounded before
//! display and whole numbers are shown without a decimal point.

/// Decimal places kept by default
pub const DEFAULT_PRECISION: usize = 2;

/// Largest precision honoured; an `f64` carries no more significant digits
pub const MAX_PRECISION: usize = 17;

/// Formats `value` rounded to `precision` decimal places
///
/// Rounds the exact binary value, so `2.675` (stored just below the tie)
/// gives `"2.67"`. Exact decimal ties round away from zero. Trailing zeros
/// and a trailing decimal point are dropped: `3.0 -> "3"`, `3.256 -> "3.26"`,
/// `0.2 -> "0.2"`. Precision above `MAX_PRECISION` is clamped.
pub fn clean_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.min(MAX_PRECISION);
    // `format!` rounds exact ties to even
    let value = if is_exact_tie(value, precision) {
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };

    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Whether `value` lies exactly halfway between two `precision`-digit decimals
///
/// A dyadic fraction with `k` fractional bits has exactly `k` fractional
/// decimal digits, the last of which is 5. So `value` is a tie exactly when it
/// has `precision + 1` fractional bits. Scaling by powers of two is exact.
fn is_exact_tie(value: f64, precision: usize) -> bool {
    let bits = precision as i32;
    let below = value * 2f64.powi(bits);
    let at = value * 2f64.powi(bits + 1);
    below.fract() != 0.0 && at.fract() == 0.0
}
