//! Lenient parsing and normalization of raw NF-e field strings.
//!
//! The extraction layer upstream hands over whatever text it found in the
//! invoice; these helpers define the exact fallback for each shape of bad
//! input. Monetary and date strings are the lenient zone (bad input falls
//! back to zero / absent), as opposed to taxpayer IDs and revenue codes,
//! which the builders validate strictly.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Keep ASCII digits only.
pub fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse a decimal string leniently: `None`, empty, or unparseable input
/// is zero. Never goes through binary floating point.
pub fn dec_or_zero(s: Option<&str>) -> Decimal {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Decimal::from_str(s).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Exactly 6 ASCII digits — the shape of every GNRE revenue code.
pub fn is_receita(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize a municipality code to the 5-digit form GNRE expects.
///
/// A 7-digit IBGE code has its 2-digit UF prefix stripped; 5 digits pass
/// through; longer codes keep their last 5 digits; anything shorter
/// (including empty) normalizes to absent.
pub fn municipio5(cmun: Option<&str>) -> Option<String> {
    let s = digits(cmun?);
    match s.len() {
        7 => Some(s[2..7].to_string()),
        5 => Some(s),
        n if n > 5 => Some(s[n - 5..].to_string()),
        _ => None,
    }
}

/// Extract the date portion of an ISO-8601 timestamp, leniently.
///
/// Accepts RFC 3339 (`2024-06-15T10:30:00-03:00`, `...Z`), a naive
/// datetime, or a bare `YYYY-MM-DD` prefix. Unparseable input is absent.
pub fn data_only(iso: Option<&str>) -> Option<NaiveDate> {
    let s = iso?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    s.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Format a monetary amount with exactly 2 fraction digits.
///
/// Rounding is `Decimal::round_dp`'s default, banker's rounding
/// (midpoint-nearest-even). The evaluator and the XML builders both go
/// through here so the two entry points can never disagree on cents.
pub fn fmt_valor(d: Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}
