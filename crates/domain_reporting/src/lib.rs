//! Aggregation Domain
//!
//! Read-only computation over visit and report history, plus the monthly
//! roll-up report an overseer reviews. All statistics functions are pure:
//! they take slices the caller loaded, never touch a store, and recompute
//! from scratch on every call, so regeneration is idempotent by construction.

pub mod monthly;
pub mod statistics;
pub mod dashboard;
pub mod metrics;
pub mod store;

pub use monthly::{MonthlyReport, MonthlyReportStatus, MonthlyNarrative};
pub use statistics::{compute_monthly_statistics, MonthlyStatistics};
pub use dashboard::{compute_dashboard, FieldActorDashboard};
pub use metrics::{subject_performance, PerformanceTrend, SubjectPerformance};
pub use store::MonthlyReportStore;
