//! Test Utilities
//!
//! Builders, fixtures, and a ready-wired engine harness shared across the
//! workspace test suites.

pub mod builders;
pub mod fixtures;
pub mod harness;

pub use builders::{
    AssignmentBuilder, ComplaintBuilder, MonthlyReportBuilder, ReportBuilder, VisitBuilder,
};
pub use fixtures::{objectives, report_summary, today, this_month};
pub use harness::TestHarness;
