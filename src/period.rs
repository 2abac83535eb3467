// src/period.rs

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Portuguese month abbreviations, January first.
pub const MONTH_ABBREVS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// How many keys [`period_sequence`] yields when the caller has no preference.
pub const DEFAULT_SEQUENCE_LEN: usize = 8;

/// Source of "today". Injected so period math is reproducible in tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// First day of `month`/`year`. Panics on an invalid month; test helper.
    pub fn month(year: i32, month: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, 1).expect("valid month"))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodKeyError {
    #[error("period key {0:?} is not in MM/YYYY form")]
    Format(String),
    #[error("month {0} is outside 1..=12")]
    Month(u32),
    #[error("year {0} is not positive")]
    Year(i32),
}

/// A billing month, rendered as `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodKeyError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodKeyError::Month(month));
        }
        if year <= 0 {
            return Err(PeriodKeyError::Year(year));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn abbrev(&self) -> &'static str {
        MONTH_ABBREVS[self.month as usize - 1]
    }

    /// The following month, rolling December into January of the next year.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for PeriodKey {
    type Err = PeriodKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (m, y) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| PeriodKeyError::Format(s.to_string()))?;
        let month: u32 = m
            .parse()
            .map_err(|_| PeriodKeyError::Format(s.to_string()))?;
        let year: i32 = y
            .parse()
            .map_err(|_| PeriodKeyError::Format(s.to_string()))?;
        Self::new(month, year)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn current_period_key(clock: &dyn Clock) -> PeriodKey {
    PeriodKey::from_date(clock.today())
}

pub fn current_period_abbrev(clock: &dyn Clock) -> &'static str {
    current_period_key(clock).abbrev()
}

/// `"mmm/yyyy"`, e.g. `05/2025` → `mai/2025`.
pub fn format_period(key: &PeriodKey) -> String {
    format!("{}/{}", key.abbrev(), key.year())
}

/// `count` consecutive keys starting at `start`.
pub fn period_sequence(start: PeriodKey, count: usize) -> PeriodSequence {
    PeriodSequence {
        next: start,
        remaining: count,
    }
}

#[derive(Debug, Clone)]
pub struct PeriodSequence {
    next: PeriodKey,
    remaining: usize,
}

impl Iterator for PeriodSequence {
    type Item = PeriodKey;

    fn next(&mut self) -> Option<PeriodKey> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next;
        self.next = current.next();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PeriodSequence {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(seq: PeriodSequence) -> Vec<String> {
        seq.map(|k| k.to_string()).collect()
    }

    #[test]
    fn current_key_is_zero_padded() {
        let clock = FixedClock::month(2025, 5);
        assert_eq!(current_period_key(&clock).to_string(), "05/2025");
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 11, 30).unwrap());
        assert_eq!(current_period_key(&clock).to_string(), "11/2024");
    }

    #[test]
    fn april_is_abr() {
        assert_eq!(current_period_abbrev(&FixedClock::month(2025, 4)), "abr");
        assert_eq!(current_period_abbrev(&FixedClock::month(2025, 1)), "jan");
        assert_eq!(current_period_abbrev(&FixedClock::month(2025, 12)), "dez");
    }

    #[test]
    fn sequence_rolls_over_year() {
        let start: PeriodKey = "11/2024".parse().unwrap();
        assert_eq!(
            keys(period_sequence(start, 3)),
            vec!["11/2024", "12/2024", "01/2025"]
        );
    }

    #[test]
    fn sequence_spanning_two_years() {
        let start: PeriodKey = "06/2024".parse().unwrap();
        let seq: Vec<_> = period_sequence(start, 20).collect();
        assert_eq!(seq.len(), 20);
        assert_eq!(seq[19].to_string(), "01/2026");
    }

    #[test]
    fn sequence_is_restartable() {
        let seq = period_sequence("05/2025".parse().unwrap(), DEFAULT_SEQUENCE_LEN);
        assert_eq!(seq.len(), 8);
        let again = seq.clone();
        assert_eq!(keys(seq), keys(again));
        assert!(period_sequence("05/2025".parse().unwrap(), 0).next().is_none());
    }

    #[test]
    fn rejects_bad_keys() {
        assert_eq!("13/2025".parse::<PeriodKey>(), Err(PeriodKeyError::Month(13)));
        assert_eq!("00/2025".parse::<PeriodKey>(), Err(PeriodKeyError::Month(0)));
        assert_eq!("05/0".parse::<PeriodKey>(), Err(PeriodKeyError::Year(0)));
        assert!(matches!(
            "may-2025".parse::<PeriodKey>(),
            Err(PeriodKeyError::Format(_))
        ));
    }

    #[test]
    fn long_form_label() {
        let key: PeriodKey = "05/2025".parse().unwrap();
        assert_eq!(format_period(&key), "mai/2025");
    }
}
