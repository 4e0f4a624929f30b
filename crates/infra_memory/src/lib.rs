//! In-Memory Infrastructure Adapters
//!
//! The durable entity store is an external collaborator; these adapters
//! implement the same port traits over `RwLock`ed maps with optimistic
//! version checking, for tests and for embedding the engine without a
//! database. Every `update` re-validates the record version before the swap,
//! so a lost read-modify-write race surfaces as a `Conflict` instead of a
//! silent overwrite.

pub mod visits;
pub mod reports;
pub mod complaints;
pub mod assignments;
pub mod monthly;
pub mod notifications;
pub mod policy;

pub use visits::MemoryVisitStore;
pub use reports::MemoryReportStore;
pub use complaints::MemoryComplaintStore;
pub use assignments::MemoryAssignmentStore;
pub use monthly::MemoryMonthlyReportStore;
pub use notifications::InboxDispatcher;
pub use policy::{Role, RoleBook};
