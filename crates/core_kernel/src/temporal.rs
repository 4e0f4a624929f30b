//! Calendar-month windows for periodic reporting
//!
//! Monthly roll-ups are keyed by (field actor, calendar month). The month is
//! a value type of its own so statistics windows cannot drift off month
//! boundaries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}

/// A calendar month used as a reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    /// Creates a reporting month, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Valid by construction: month is in 1..=12 and day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month validated at construction")
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or_else(|| self.first_day())
    }

    /// The following calendar month
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

    /// Returns true if the date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportingMonth {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| TemporalError::InvalidMonth(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| TemporalError::InvalidMonth(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| TemporalError::InvalidMonth(s.to_string()))?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let month = ReportingMonth::new(2025, 2).unwrap();
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_month_rollover() {
        let december = ReportingMonth::new(2024, 12).unwrap();
        let january = december.next();
        assert_eq!(january.year(), 2025);
        assert_eq!(january.month(), 1);
    }

    #[test]
    fn test_contains() {
        let month = ReportingMonth::new(2025, 3).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(ReportingMonth::new(2025, 0).is_err());
        assert!(ReportingMonth::new(2025, 13).is_err());
    }

    #[test]
    fn test_parse_roundtrip() {
        let month: ReportingMonth = "2025-07".parse().unwrap();
        assert_eq!(month.to_string(), "2025-07");
        assert!("2025".parse::<ReportingMonth>().is_err());
        assert!("2025-xx".parse::<ReportingMonth>().is_err());
    }
}
