//! Monetary values as sent by the server.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decimal amount exactly as the server sent it.
///
/// The backend serializes `Decimal` columns as strings (`"150.00"`) or, in some
/// serializers, as JSON numbers. Both are accepted and the original text is
/// kept. [`Display`](fmt::Display) renders two decimals. Amounts support no
/// arithmetic; totals come from the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid amount '{0}'")]
pub struct AmountError(pub String);

impl Amount {
    /// The server's value, verbatim.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render with exactly two decimals, rounding half away from zero.
    pub fn to_display(&self) -> String {
        format_two_decimals(&self.0).unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_display())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts plain decimal text such as `12`, `12.5` or `-0.75`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match split_decimal(trimmed) {
            Some(_) => Ok(Amount(trimmed.to_string())),
            None => Err(AmountError(s.to_string())),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Ok(Amount(text)),
            Raw::Number(number) => Ok(Amount(number.to_string())),
        }
    }
}

/// Split `[-]digits[.digits]` into sign, integer digits and fraction digits.
fn split_decimal(raw: &str) -> Option<(bool, &str, &str)> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    Some((negative, int_part, frac_part))
}

fn format_two_decimals(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let Some((negative, int_part, frac_part)) = split_decimal(trimmed) else {
        // Exponent notation from JSON numbers.
        let value: f64 = trimmed.parse().ok()?;
        return value.is_finite().then(|| format!("{value:.2}"));
    };

    // Work on the digits of value * 100 so no binary float rounding leaks in.
    let mut digits: Vec<u8> = if int_part.is_empty() { b"0".to_vec() } else { int_part.as_bytes().to_vec() };
    let frac = frac_part.as_bytes();
    digits.push(*frac.first().unwrap_or(&b'0'));
    digits.push(*frac.get(1).unwrap_or(&b'0'));
    let round_up = frac.get(2).is_some_and(|d| *d >= b'5');

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let int_digits = std::str::from_utf8(&digits[..split]).ok()?.trim_start_matches('0');
    let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
    let cents = std::str::from_utf8(&digits[split..]).ok()?;

    let is_zero = int_digits == "0" && cents == "00";
    let sign = if negative && !is_zero { "-" } else { "" };
    Some(format!("{sign}{int_digits}.{cents}"))
}
