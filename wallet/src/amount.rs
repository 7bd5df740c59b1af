//! Conversion between user-entered decimal strings and fixed-point token
//! units.
//!
//! ## Rounding Policy
//!
//! Converting a display string to units **truncates** fractional digits past
//! the precision; nothing is ever rounded up. Converting units back to a
//! display string is exact.
//!
//! All arithmetic is checked `i128`, the amount type the vault contract
//! takes. Floating point is never involved.

/// Decimal places of the vault token (Stellar asset contracts use 7).
pub const TOKEN_DECIMALS: u32 = 7;

/// Largest precision whose scale factor `10^precision` fits in `i128`.
pub const MAX_PRECISION: u32 = 38;

/// Parse a display amount such as `"12.5"` into token units.
///
/// Anything that is not a plain non-negative decimal (empty input, a minus
/// sign, an exponent, stray characters, a second `.`) converts to `0`, as
/// does a value too large for `i128`. A single leading `+` is accepted.
/// Callers treat a non-positive result as an invalid amount.
pub fn to_unit_amount(display: &str, precision: u32) -> i128 {
    parse_units(display.trim(), precision).unwrap_or(0)
}

fn parse_units(display: &str, precision: u32) -> Option<i128> {
    let display = display.strip_prefix('+').unwrap_or(display);
    let (whole, fraction) = match display.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (display, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let scalar = 10_i128.checked_pow(precision)?;
    let whole: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

    // Truncate to `precision` digits, then right-pad.
    let kept = &fraction[..fraction.len().min(precision as usize)];
    let mut fraction_units: i128 = if kept.is_empty() { 0 } else { kept.parse().ok()? };
    for _ in kept.len()..precision as usize {
        fraction_units = fraction_units.checked_mul(10)?;
    }

    whole.checked_mul(scalar)?.checked_add(fraction_units)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Render token units as a display amount with no trailing zeros.
///
/// `to_display_amount(123_450_000, 7)` is `"12.345"`; a whole number has no
/// decimal point. Negative values keep their sign in front of the magnitude.
///
/// A precision above [`MAX_PRECISION`] has no unit representation and
/// renders as `"0"`, mirroring [`to_unit_amount`].
pub fn to_display_amount(units: i128, precision: u32) -> String {
    if precision > MAX_PRECISION {
        return "0".to_string();
    }
    let sign = if units < 0 { "-" } else { "" };
    let magnitude = units.unsigned_abs();
    let scalar = 10_u128.pow(precision);
    format_parts(sign, magnitude / scalar, magnitude % scalar, precision as usize)
}

fn format_parts(sign: &str, whole: u128, fraction: u128, width: usize) -> String {
    let padded = format!("{fraction:0width$}");
    let trimmed = padded.trim_end_matches('0');
    if trimmed.is_empty() {
        if whole == 0 {
            "0".to_string()
        } else {
            format!("{sign}{whole}")
        }
    } else {
        format!("{sign}{whole}.{trimmed}")
    }
}
