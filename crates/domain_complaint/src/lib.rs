//! Complaint Domain
//!
//! Complaints are filed against a subject and may trigger an investigation
//! visit. The lifecycle is independent of any visit that references it.
//!
//! ```text
//! Pending -> UnderInvestigation -> Resolved | Dismissed
//! ```

pub mod complaint;
pub mod store;

pub use complaint::{Complaint, ComplaintSeverity, ComplaintStatus, FileComplaint};
pub use store::{ComplaintFilter, ComplaintStore};
