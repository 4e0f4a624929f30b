//! Visit lifecycle events
//!
//! Each visit carries an append-only history of lifecycle events. Review
//! feedback lands here as structured entries rather than being concatenated
//! into a notes field, so the full back-and-forth of a decline/resubmit
//! exchange stays readable and replayable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ActorId;

/// Events recorded against a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VisitEvent {
    /// Visit was scheduled
    Scheduled { by: ActorId, at: DateTime<Utc> },

    /// Field actor reported starting the visit
    Started { at: DateTime<Utc> },

    /// Field actor completed the visit and submitted the report body
    Completed { at: DateTime<Utc> },

    /// Visit was cancelled
    Cancelled { at: DateTime<Utc>, reason: String },

    /// Overseer verified the start
    StartVerified { by: ActorId, at: DateTime<Utc> },

    /// Overseer accepted the completion report
    CompletionAccepted {
        by: ActorId,
        at: DateTime<Utc>,
        feedback: Option<String>,
    },

    /// Overseer declined the completion report; the visit regressed
    CompletionDeclined {
        by: ActorId,
        at: DateTime<Utc>,
        feedback: String,
    },
}

impl VisitEvent {
    /// When the event occurred
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            VisitEvent::Scheduled { at, .. }
            | VisitEvent::Started { at }
            | VisitEvent::Completed { at }
            | VisitEvent::Cancelled { at, .. }
            | VisitEvent::StartVerified { at, .. }
            | VisitEvent::CompletionAccepted { at, .. }
            | VisitEvent::CompletionDeclined { at, .. } => *at,
        }
    }
}
