//! Locale-invariant number parsing and two-decimal (N2) display formatting.
//!
//! Parsing accepts what a user types into a form field: surrounding
//! whitespace, an optional leading sign and `.` as the decimal separator.
//! Decimals may also carry `,` thousands grouping in the integer part so that
//! a formatted value can be typed back in verbatim.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a whole number that fits a signed 32-bit integer.
///
/// Fractions, exponents and grouping separators are rejected.
pub fn parse_integer(text: &str) -> Option<i32> {
    let (negative, digits) = split_sign(text.trim());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Anything longer than i64 is out of range for i32 anyway.
    let magnitude: i64 = digits.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Parse a decimal number.
///
/// Returns `None` for malformed input and for values outside the range of
/// [`Decimal`]. Negative zero is normalized to zero.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let (negative, body) = split_sign(text.trim());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (body, ""),
    };

    if int_part.starts_with(',') || !int_part.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let int_digits: String = int_part.chars().filter(|c| *c != ',').collect();
    if int_digits.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(int_digits.len() + frac_part.len() + 3);
    if negative {
        normalized.push('-');
    }
    if int_digits.is_empty() {
        normalized.push('0');
    } else {
        normalized.push_str(&int_digits);
    }
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    let value = Decimal::from_str(&normalized).ok()?;
    Some(if value.is_zero() { Decimal::ZERO } else { value })
}

/// Format with exactly two decimal places, rounding midpoints away from zero.
///
/// With `digit_grouping` the integer part is grouped in thousands
/// (`1,234.50`); without it the plain form is used (`1234.50`).
pub fn format_n2(value: Decimal, digit_grouping: bool) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);

    let text = rounded.to_string();
    if !digit_grouping {
        return text;
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
