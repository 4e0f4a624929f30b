//! Core Kernel - Foundational types for the inspection platform
//!
//! This crate provides the building blocks used across all domain modules:
//! - Bounded rating values with precise decimal arithmetic
//! - Calendar-month windows for periodic reporting
//! - Strongly-typed identifiers
//! - The shared review protocol and workflow error taxonomy
//! - Port traits for the entity store, access policy, and notifications

pub mod rating;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod review;
pub mod ports;
pub mod notify;
pub mod config;

pub use rating::{Rating, RatingError, RatingHistogram, average_rating};
pub use temporal::{ReportingMonth, TemporalError};
pub use identifiers::{
    ActorId, VisitId, ReportId, ComplaintId, MonthlyReportId,
    RegionId, AssignmentId, NotificationId,
};
pub use error::WorkflowError;
pub use review::{
    ReviewDecision, ReviewProtocol, ReviewVerdict, OutcomeRule,
    VISIT_COMPLETION_REVIEW, REPORT_REVIEW, MONTHLY_REVIEW,
};
pub use ports::{AccessPolicy, Action, EntityKind, EntityRef, StoreError};
pub use notify::{
    Notification, NotificationDispatcher, NotificationKind, NotificationStore,
};
pub use config::ReportingThresholds;
