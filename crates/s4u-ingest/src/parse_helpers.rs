//! Leading-number scanners for export columns.
//!
//! Export values are loosely formatted (`"19.99"`, `" 25 "`, `"12 pcs"`), so
//! both scanners read the longest numeric prefix after leading whitespace
//! and ignore whatever follows. No prefix means `None`.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses the leading decimal number of `s`, e.g. `"19.99 USD"` → `19.99`.
///
/// Accepts an optional sign, digits with an optional fractional part, and
/// an optional exponent (`"1.5e2"`). At least one digit is required.
pub(crate) fn parse_decimal_prefix(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut mantissa = String::with_capacity(int_digits.len() + frac_digits.len() + 3);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows the marker.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'-' || bytes[j] == b'+') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            let exponent = s[i + 1..j].trim_start_matches('+');
            return Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok();
        }
    }

    Decimal::from_str(&mantissa).ok()
}

/// Parses the leading base-10 integer of `s`, e.g. `"12 pcs"` → `12`.
///
/// Values beyond the `i64` range saturate.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let digits_start = i;
    let mut value: i64 = 0;
    while i < len && bytes[i].is_ascii_digit() {
        let digit = i64::from(bytes[i] - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }

    (i > digits_start).then_some(value)
}
