//! Workflow error taxonomy
//!
//! Every guard in the visit, review, complaint, and monthly-report state
//! machines resolves to one of these variants. The two review hierarchies are
//! isomorphic, so a single shared taxonomy replaces per-domain enums; all
//! errors are detected locally and returned synchronously, never retried
//! inside the engine.

use thiserror::Error;

use crate::identifiers::ActorId;
use crate::ports::{Action, StoreError};
use crate::rating::RatingError;

/// Errors returned by workflow operations
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The operation is not legal from the record's current status
    #[error("Operation {operation} is not valid from status {status}")]
    InvalidState {
        operation: &'static str,
        status: String,
    },

    /// The visit already has a start timestamp
    #[error("Visit already started")]
    AlreadyStarted,

    /// The visit already has a completion timestamp
    #[error("Visit already completed")]
    AlreadyCompleted,

    /// A review decision has already been recorded for this cycle
    #[error("Already reviewed")]
    AlreadyReviewed,

    /// Completing a visit requires a non-empty report body
    #[error("A report is required to complete a visit")]
    ReportRequired,

    /// The chosen review outcome requires feedback text
    #[error("Feedback is required for this decision")]
    FeedbackRequired,

    /// Completed visits cannot be cancelled
    #[error("Cannot cancel a completed visit")]
    CannotCancelCompleted,

    /// The access policy denied the operation
    #[error("Actor {actor} is not allowed to {action}")]
    Forbidden { actor: ActorId, action: Action },

    /// The referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Rating(#[from] RatingError),

    #[error(transparent)]
    Store(StoreError),
}

impl WorkflowError {
    /// Creates an InvalidState error
    pub fn invalid_state(operation: &'static str, status: impl ToString) -> Self {
        WorkflowError::InvalidState {
            operation,
            status: status.to_string(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        WorkflowError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a Forbidden error
    pub fn forbidden(actor: ActorId, action: Action) -> Self {
        WorkflowError::Forbidden { actor, action }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity_type, id } => WorkflowError::NotFound {
                entity: entity_type,
                id,
            },
            other => WorkflowError::Store(other),
        }
    }
}
