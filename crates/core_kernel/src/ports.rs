//! Ports consumed by the workflow engine
//!
//! The engine owns no persistent state: every operation reads current state
//! through a store port, validates, and writes back. Store, access policy,
//! and notification delivery are all external collaborators reached through
//! the traits in this module; adapters live outside the domain crates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::identifiers::ActorId;

/// Error type for store port operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// A concurrent writer changed the record between read and commit
    #[error("Version conflict on {entity_type} {id}")]
    Conflict { entity_type: &'static str, id: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal store error occurred
    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(entity_type: &'static str, id: impl fmt::Display) -> Self {
        StoreError::Conflict {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error indicates a lost optimistic-version race
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Kinds of records a reference can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Visit,
    Report,
    Complaint,
    MonthlyReport,
    Assignment,
    Actor,
}

/// Reference to a workflow record, used on notifications and policy checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Uuid,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<Uuid>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.id)
    }
}

/// Actions the engine asks the access policy about
///
/// The engine never inspects roles itself; every mutating operation is gated
/// by a single capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ScheduleVisit,
    StartVisit,
    CompleteVisit,
    CancelVisit,
    VerifyVisitStart,
    ReviewVisitCompletion,
    SubmitReport,
    ReviewReport,
    FileComplaint,
    AssignComplaint,
    ResolveComplaint,
    ManageAssignment,
    SubmitMonthlyReport,
    ReviewMonthlyReport,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::ScheduleVisit => "schedule_visit",
            Action::StartVisit => "start_visit",
            Action::CompleteVisit => "complete_visit",
            Action::CancelVisit => "cancel_visit",
            Action::VerifyVisitStart => "verify_visit_start",
            Action::ReviewVisitCompletion => "review_visit_completion",
            Action::SubmitReport => "submit_report",
            Action::ReviewReport => "review_report",
            Action::FileComplaint => "file_complaint",
            Action::AssignComplaint => "assign_complaint",
            Action::ResolveComplaint => "resolve_complaint",
            Action::ManageAssignment => "manage_assignment",
            Action::SubmitMonthlyReport => "submit_monthly_report",
            Action::ReviewMonthlyReport => "review_monthly_report",
        };
        write!(f, "{name}")
    }
}

/// Role/region/assignment-based authorization, resolved outside the engine
///
/// A `false` answer surfaces to the caller as `Forbidden` and is never
/// retried.
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn can(&self, actor: ActorId, action: Action, target: &EntityRef) -> bool;
}
