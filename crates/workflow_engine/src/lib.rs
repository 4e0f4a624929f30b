//! Inspection Workflow Engine
//!
//! Stateless orchestration over the domain aggregates. Every mutating
//! operation follows the same shape:
//!
//! 1. validate the payload
//! 2. ask the access policy (`false` surfaces as `Forbidden`)
//! 3. read the current record from the store
//! 4. run the aggregate's own transition validation
//! 5. commit one optimistic-versioned write (a lost race is a `Conflict`,
//!    never a silent overwrite)
//! 6. emit notifications best-effort, off the critical path
//!
//! The engine holds no state of its own, so independent records progress
//! fully in parallel and any number of engine instances may serve the same
//! store.

pub mod engine;
pub mod inputs;
mod notify;
mod visits;
mod reports;
mod complaints;
mod assignments;
mod reporting;
mod notifications;

pub use engine::{EngineServices, WorkflowEngine};
pub use inputs::{
    CreateAssignmentInput, FileComplaintInput, ReportScoresInput, ScheduleVisitInput,
    SubmitReportInput,
};
