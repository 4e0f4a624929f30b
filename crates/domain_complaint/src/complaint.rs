//! Complaint aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActorId, ComplaintId, WorkflowError};

/// Complaint status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Filed, awaiting triage
    Pending,
    /// A field actor has been assigned to investigate
    UnderInvestigation,
    /// Investigated and closed with a resolution
    Resolved,
    /// Closed without action
    Dismissed,
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::UnderInvestigation => "under_investigation",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Dismissed => "dismissed",
        };
        write!(f, "{name}")
    }
}

/// Complaint severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A complaint filed against a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Unique identifier
    pub id: ComplaintId,
    /// Teacher the complaint is about
    pub subject: ActorId,
    /// Who filed it
    pub filed_by: ActorId,
    /// Short title
    pub title: String,
    /// Full description
    pub description: String,
    /// Category, e.g. behavior, attendance, teaching quality
    pub category: Option<String>,
    /// Supporting evidence or documentation references
    pub evidence: Option<String>,
    /// Severity
    pub severity: ComplaintSeverity,
    /// Status
    pub status: ComplaintStatus,
    /// Field actor assigned to investigate
    pub assigned_to: Option<ActorId>,
    /// Closing notes
    pub resolution_notes: Option<String>,
    /// Filed timestamp
    pub filed_at: DateTime<Utc>,
    /// Terminal timestamp, set on resolve or dismiss
    pub resolved_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to file a complaint
#[derive(Debug, Clone)]
pub struct FileComplaint {
    pub subject: ActorId,
    pub filed_by: ActorId,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub evidence: Option<String>,
    pub severity: ComplaintSeverity,
}

impl Complaint {
    /// Files a new complaint
    pub fn file(details: FileComplaint) -> Self {
        let now = Utc::now();
        Self {
            id: ComplaintId::new_v7(),
            subject: details.subject,
            filed_by: details.filed_by,
            title: details.title,
            description: details.description,
            category: details.category,
            evidence: details.evidence,
            severity: details.severity,
            status: ComplaintStatus::Pending,
            assigned_to: None,
            resolution_notes: None,
            filed_at: now,
            resolved_at: None,
            version: 1,
            updated_at: now,
        }
    }

    /// Assigns a field actor to investigate
    ///
    /// Valid from pending or under_investigation (reassignment); moves the
    /// complaint to under_investigation either way.
    pub fn assign(&mut self, field_actor: ActorId) -> Result<(), WorkflowError> {
        match self.status {
            ComplaintStatus::Pending | ComplaintStatus::UnderInvestigation => {}
            _ => return Err(WorkflowError::invalid_state("assign", self.status)),
        }

        self.assigned_to = Some(field_actor);
        self.status = ComplaintStatus::UnderInvestigation;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Closes the complaint with a resolution
    pub fn resolve(&mut self, notes: impl Into<String>) -> Result<(), WorkflowError> {
        self.close(ComplaintStatus::Resolved, notes.into(), "resolve")
    }

    /// Closes the complaint without action
    pub fn dismiss(&mut self, notes: impl Into<String>) -> Result<(), WorkflowError> {
        self.close(ComplaintStatus::Dismissed, notes.into(), "dismiss")
    }

    fn close(
        &mut self,
        target: ComplaintStatus,
        notes: String,
        operation: &'static str,
    ) -> Result<(), WorkflowError> {
        if self.is_terminal() {
            return Err(WorkflowError::invalid_state(operation, self.status));
        }

        let now = Utc::now();
        self.status = target;
        self.resolution_notes = Some(notes);
        self.resolved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// True once resolved or dismissed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ComplaintStatus::Resolved | ComplaintStatus::Dismissed
        )
    }
}
