//! Calendar month tokens and date ranges
//!
//! Budgets are keyed by a zero-padded `YYYY-MM` month token. Reconciliation
//! and the write-path guard both need to turn dates into month tokens and
//! month tokens back into instant ranges; that logic lives here.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, displayed and stored as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthToken {
    year: i32,
    month: u32,
}

impl MonthToken {
    /// Create a month token, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if !(0..=9999).contains(&year) {
            return Err(MonthParseError::InvalidFormat(format!("{}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given instant
    pub fn containing(instant: NaiveDateTime) -> Self {
        Self::of_date(instant.date())
    }

    /// The month containing the given date
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today (local clock)
    pub fn current() -> Self {
        Self::of_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// 00:00:00.000 on the first day of the month
    pub fn first_instant(&self) -> NaiveDateTime {
        self.first_day().and_time(NaiveTime::MIN)
    }

    /// 23:59:59.999 on the last day of the month
    pub fn last_instant(&self) -> NaiveDateTime {
        end_of_day(self.last_day())
    }

    /// The month range `[first_instant, last_instant]`
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_instant(),
            end: self.last_instant(),
        }
    }

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

    /// Parse a strict `YYYY-MM` token (four-digit year, two-digit month)
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = s[..4]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = s[5..]
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthToken {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthToken {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthToken> for String {
    fn from(token: MonthToken) -> Self {
        token.to_string()
    }
}

/// Error type for month token parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid month format '{}'. Use YYYY-MM.", s)
            }
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

/// 23:59:59.999 on the given date
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// Every month whose first day falls in `[first day of start's month, end]`
///
/// Always contains the month of `start` when `start <= end`, and runs through
/// the month containing `end`.
pub fn months_in_range(start: NaiveDateTime, end: NaiveDateTime) -> Vec<MonthToken> {
    let mut months = Vec::new();
    let mut current = MonthToken::containing(start);

    while current.first_instant() <= end {
        months.push(current);
        current = current.next();
    }

    months
}

/// Parse a user-supplied date: `YYYY-MM-DD`, optionally with a time of day
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime, DateParseError> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    Err(DateParseError(s.to_string()))
}

/// Parse a calendar date; a time of day is rejected, not dropped
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DateParseError(s.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError(pub String);

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid date '{}'. Use YYYY-MM-DD.", self.0)
    }
}

impl std::error::Error for DateParseError {}

/// An inclusive instant range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Build a query range from two calendar dates
    ///
    /// The start is taken at midnight and the end is pushed to its last
    /// millisecond so single-day ranges include the whole day.
    pub fn from_dates(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, DateRangeError> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(DateRangeError::Missing),
        };
        if start > end {
            return Err(DateRangeError::Reversed { start, end });
        }

        Ok(Self {
            start: start.and_time(NaiveTime::MIN),
            end: end_of_day(end),
        })
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Month tokens covered by this range
    pub fn months(&self) -> Vec<MonthToken> {
        months_in_range(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    Missing,
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Start date and end date are required."),
            Self::Reversed { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
        }
    }
}

impl std::error::Error for DateRangeError {}
