//! Date ranges used by the filter bar and the usage queries.
//!
//! Everything here works on calendar days. "Today" is whatever local date the
//! caller passes in; no timezone normalisation happens in this module.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Wire format for every date the API sends or accepts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("a date range must span at least one day")]
    ZeroDays,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("no date range selected")]
    Empty,
    #[error("a {0}-day window does not fit the calendar")]
    OutOfRange(u32),
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self { start_date, end_date }
    }

    /// The last `days` days ending on `reference`, both ends included.
    ///
    /// `recent(30, 2024-03-15)` is `2024-02-15 ..= 2024-03-15`.
    pub fn recent(days: u32, reference: NaiveDate) -> Result<Self, DateRangeError> {
        if days == 0 {
            return Err(DateRangeError::ZeroDays);
        }
        let start_date = Duration::try_days(i64::from(days) - 1)
            .and_then(|span| reference.checked_sub_signed(span))
            .ok_or(DateRangeError::OutOfRange(days))?;
        Ok(Self {
            start_date,
            end_date: reference,
        })
    }

    /// Parse a start/end pair of `YYYY-MM-DD` strings; the start may not be
    /// after the end
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if start_date > end_date {
            return Err(DateRangeError::Inverted {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self { start_date, end_date })
    }

    /// Parse the picker's start/end pair; either side blank means no range
    pub fn from_picker(start: &str, end: &str) -> Result<Self, DateRangeError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(DateRangeError::Empty);
        }
        Self::parse(start, end)
    }

    pub fn start_str(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }

    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_str(), self.end_str())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        parse_date(value).unwrap()
    }

    #[test]
    fn test_recent_thirty_days() {
        let range = DateRange::recent(30, day("2024-03-15")).unwrap();
        assert_eq!(range.start_str(), "2024-02-15");
        assert_eq!(range.end_str(), "2024-03-15");
        assert_eq!(range.days(), 30);
    }

    #[test]
    fn test_recent_single_day() {
        let reference = day("2023-12-31");
        let range = DateRange::recent(1, reference).unwrap();
        assert_eq!(range.start_date, reference);
        assert_eq!(range.end_date, reference);
    }

    #[test]
    fn test_recent_crosses_year_and_leap_day() {
        let range = DateRange::recent(61, day("2024-03-01")).unwrap();
        assert_eq!(range.start_str(), "2024-01-01");
        assert_eq!(range.days(), 61);
    }

    #[test]
    fn test_recent_rejects_zero_days() {
        assert_eq!(DateRange::recent(0, day("2024-03-15")), Err(DateRangeError::ZeroDays));
    }

    #[test]
    fn test_recent_window_past_the_calendar() {
        let reference = day("2024-03-15");
        assert_eq!(
            DateRange::recent(u32::MAX, reference),
            Err(DateRangeError::OutOfRange(u32::MAX))
        );
        assert_eq!(
            DateRange::recent(4_000_000_000, reference),
            Err(DateRangeError::OutOfRange(4_000_000_000))
        );
    }

    #[test]
    fn test_from_picker_rejects_inverted_pair() {
        assert_eq!(
            DateRange::from_picker("2024-06-30", "2024-01-01"),
            Err(DateRangeError::Inverted {
                start: day("2024-06-30"),
                end: day("2024-01-01"),
            })
        );
    }

    #[test]
    fn test_from_picker() {
        let range = DateRange::from_picker("2024-01-01", " 2024-06-30").unwrap();
        assert_eq!(range.start_str(), "2024-01-01");
        assert_eq!(range.end_str(), "2024-06-30");
        assert_eq!(range.to_string(), "2024-01-01..2024-06-30");

        let single = DateRange::from_picker("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(single.days(), 1);

        assert_eq!(DateRange::from_picker("2024-01-01", ""), Err(DateRangeError::Empty));
        assert_eq!(DateRange::from_picker("   ", "2024-01-01"), Err(DateRangeError::Empty));
        assert_eq!(
            DateRange::from_picker("yesterday", "2024-01-01"),
            Err(DateRangeError::InvalidDate("yesterday".to_string()))
        );
        assert!(DateRange::from_picker("2024-02-30", "2024-03-01").is_err());
    }
}
