//! Shared fixtures
//!
//! Tests run against a pinned "today" so month-window assertions never
//! straddle a real month boundary.

use chrono::NaiveDate;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use once_cell::sync::Lazy;

use core_kernel::ReportingMonth;

static FIXED_TODAY: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid fixture date"));

/// The pinned current date for tests
pub fn today() -> NaiveDate {
    *FIXED_TODAY
}

/// The reporting month containing [`today`]
pub fn this_month() -> ReportingMonth {
    ReportingMonth::from_date(today())
}

/// Plausible visit objectives text
pub fn objectives() -> String {
    Sentence(3..8).fake()
}

/// Plausible report summary text
pub fn report_summary() -> String {
    Sentence(5..12).fake()
}
