// src/duration.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::trace;

/// Leading integer, the way a spreadsheet export reads `"05"` or `"5h"`.
static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer prefix regex"));

/// Leading decimal number (`"12.5"`, `".5"`, `"3e2"`, `"7 horas"`).
static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("decimal prefix regex")
});

/// Convert a cell value into decimal hours.
///
/// Non-negative numbers pass through untouched; negative or non-finite ones
/// are clamped to `0.0`. Strings are read as `H:M:S[.fff]` when
/// they contain a colon, otherwise as a plain decimal. Anything that can't be
/// read yields `0.0`; a bad cell never aborts an extraction.
pub fn parse_duration(input: &Value) -> f64 {
    match input {
        Value::Number(n) => sanitize(n.as_f64()),
        Value::String(s) => parse_duration_str(s),
        _ => 0.0,
    }
}

/// String form of [`parse_duration`].
pub fn parse_duration_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    let hours = if s.contains(':') {
        parse_clock(s)
    } else {
        leading_decimal(s)
    };

    if hours.is_none() {
        trace!(cell = raw, "unreadable duration, using 0");
    }
    sanitize(hours)
}

/// Lenient plain-number read used for contracted hours.
pub fn parse_decimal(input: &Value) -> f64 {
    match input {
        Value::Number(n) => sanitize(n.as_f64()),
        Value::String(s) => sanitize(leading_decimal(s)),
        _ => 0.0,
    }
}

/// `H[:M[:S[.fff]]]` → hours, rounded to two places. The fraction of a
/// second is dropped before summing.
fn parse_clock(s: &str) -> Option<f64> {
    let mut parts = s.split(':');
    let hours = leading_int(parts.next()?)?;
    let minutes = match parts.next() {
        Some(p) => leading_int(p)?,
        None => 0,
    };
    let seconds = match parts.next() {
        Some(p) => leading_int(p.split('.').next().unwrap_or(p))?,
        None => 0,
    };

    let total = hours as f64 + minutes as f64 / 60.0 + seconds as f64 / 3600.0;
    Some(round2(total))
}

fn leading_int(s: &str) -> Option<i64> {
    INT_PREFIX
        .captures(s)
        .and_then(|caps| caps[1].parse::<i64>().ok())
}

fn leading_decimal(s: &str) -> Option<f64> {
    DECIMAL_PREFIX
        .captures(s)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Hours are never negative or non-finite; treat those as malformed.
fn sanitize(v: Option<f64>) -> f64 {
    match v {
        Some(h) if h.is_finite() && h >= 0.0 => h,
        _ => 0.0,
    }
}
