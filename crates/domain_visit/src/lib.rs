//! Visit Workflow Domain
//!
//! This crate implements the visit lifecycle from scheduling through field
//! execution, overseer verification, and the accept/decline review cycle.
//!
//! # Visit Lifecycle
//!
//! ```text
//! Scheduled -> InProgress -> Completed -> (accepted, terminal)
//!                  ^             |
//!                  +-- declined -+
//! Scheduled | InProgress -> Cancelled
//! ```

pub mod visit;
pub mod events;
pub mod store;

pub use visit::{Verification, Visit, VisitPurpose, VisitStatus};
pub use events::VisitEvent;
pub use store::{VisitFilter, VisitStore};
