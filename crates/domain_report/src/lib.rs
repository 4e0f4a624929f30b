//! Inspection Report Domain
//!
//! This crate implements the structured write-up a field actor submits after
//! a completed visit, and the overseer's ternary review over it.
//!
//! # Review Lifecycle
//!
//! ```text
//! Pending -> Approved | Rejected | RevisionNeeded
//! ```
//!
//! Every outcome is terminal for that submission attempt; a revision is a new
//! report against the same visit.

pub mod report;
pub mod store;

pub use report::{Report, ReportScores, ReviewStatus, SubmitReport};
pub use store::{ReportFilter, ReportStore};
