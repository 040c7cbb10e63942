// src/format.rs
//! Display formatting for the amounts the dashboard forms edit.
//!
//! Every formatter first throws away anything that is not an ASCII digit, so
//! it accepts both raw input (`"15000"`) and its own output (`"15,000원"`).
//! While a field is focused the bare digits are shown; otherwise the grouped,
//! suffixed form.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{de, Deserializer};

pub const WON: &str = "원";
pub const PERCENT: &str = "%";
pub const UNITS: &str = "개";
pub const MAX_COMMISSION_RATE: u32 = 100;

/// List views show timestamps in Korea Standard Time (UTC+9, no DST).
const KST_OFFSET_HOURS: i64 = 9;

pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Groups a digit string in threes from the right, dropping leading zeros.
pub fn group_thousands(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return if digits.is_empty() { String::new() } else { "0".to_string() };
    }

    let len = trimmed.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in trimmed.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_suffix(input: &str, focused: bool, suffix: &str) -> String {
    let digits = digits_only(input);
    if digits.is_empty() {
        return String::new();
    }
    if focused {
        digits
    } else {
        format!("{}{}", group_thousands(&digits), suffix)
    }
}

/// `"15000"` → `"15,000원"`, or `"15000"` while focused.
pub fn price(input: &str, focused: bool) -> String {
    with_suffix(input, focused, WON)
}

/// `"15,000개"` style target quantity.
pub fn target(input: &str, focused: bool) -> String {
    with_suffix(input, focused, UNITS)
}

/// Percentage, clamped to 100.
pub fn commission_rate(input: &str, focused: bool) -> String {
    let digits = digits_only(input);
    if digits.is_empty() {
        return String::new();
    }
    let rate = match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        // more than three significant digits is always above the cap
        d if d.len() > 3 || d.parse::<u32>().map_or(true, |n| n > MAX_COMMISSION_RATE) => {
            MAX_COMMISSION_RATE.to_string()
        }
        d => d.to_string(),
    };
    if focused {
        rate
    } else {
        format!("{rate}{PERCENT}")
    }
}

/// Thousands-grouped integer for list views.
pub fn quantity(n: i64) -> String {
    let grouped = group_thousands(&n.unsigned_abs().to_string());
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `yyyy-MM-dd` in KST.
pub fn display_date(at: DateTime<Utc>) -> String {
    (at.naive_utc() + TimeDelta::hours(KST_OFFSET_HOURS))
        .format("%Y-%m-%d")
        .to_string()
}

/// `HH:mm` in KST.
pub fn display_time(at: DateTime<Utc>) -> String {
    (at.naive_utc() + TimeDelta::hours(KST_OFFSET_HOURS))
        .format("%H:%M")
        .to_string()
}

/// Parses user input such as `"15,000원"` back into its numeric value.
/// `None` when no digits are present or the value overflows.
pub fn parse_amount(input: &str) -> Option<i64> {
    let digits = digits_only(input);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Accepts a JSON number or a formatted string; blanks become 0.
pub fn de_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl de::Visitor<'_> for AmountVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a non-negative integer or a formatted amount string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom("amount is too large"))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            if v < 0 {
                return Err(E::custom("amount cannot be negative"));
            }
            Ok(v)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v < 0.0 || v.fract() != 0.0 || v > i64::MAX as f64 {
                return Err(E::custom("amount must be a whole number"));
            }
            Ok(v as i64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            if digits_only(v).is_empty() {
                return Ok(0);
            }
            parse_amount(v).ok_or_else(|| E::custom("amount is too large"))
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}
