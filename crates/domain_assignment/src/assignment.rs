//! Assignment aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ActorId, AssignmentId, RegionId, WorkflowError};

/// What the field actor is assigned to cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum AssignmentScope {
    /// All subjects in a region
    Region { region: RegionId },
    /// One specific subject
    Subject { subject: ActorId },
}

/// Binds a field actor to a region or subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,
    /// The assigned field actor
    pub field_actor: ActorId,
    /// Coverage scope
    pub scope: AssignmentScope,
    /// Overseer who made the assignment
    pub assigned_by: ActorId,
    /// Notes from the assigning overseer
    pub notes: Option<String>,
    /// Only active assignments authorize new work
    pub is_active: bool,
    /// Assigned timestamp
    pub assigned_at: DateTime<Utc>,
    /// When the assignment was last deactivated
    pub deactivated_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency version
    pub version: u64,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Creates a new active assignment
    pub fn new(
        field_actor: ActorId,
        scope: AssignmentScope,
        assigned_by: ActorId,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AssignmentId::new_v7(),
            field_actor,
            scope,
            assigned_by,
            notes,
            is_active: true,
            assigned_at: now,
            deactivated_at: None,
            version: 1,
            updated_at: now,
        }
    }

    /// Deactivates the assignment; past visits remain valid
    pub fn deactivate(&mut self) -> Result<(), WorkflowError> {
        if !self.is_active {
            return Err(WorkflowError::invalid_state("deactivate", "inactive"));
        }
        let now = Utc::now();
        self.is_active = false;
        self.deactivated_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Reactivates a previously deactivated assignment
    pub fn reactivate(&mut self) -> Result<(), WorkflowError> {
        if self.is_active {
            return Err(WorkflowError::invalid_state("reactivate", "active"));
        }
        self.is_active = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True if this assignment authorizes work on the given subject/region
    pub fn covers(&self, subject: ActorId, region: Option<RegionId>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.scope {
            AssignmentScope::Subject { subject: assigned } => assigned == subject,
            AssignmentScope::Region { region: assigned } => region == Some(assigned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_assignment_covers() {
        let subject = ActorId::new();
        let assignment = Assignment::new(
            ActorId::new(),
            AssignmentScope::Subject { subject },
            ActorId::new(),
            None,
        );

        assert!(assignment.covers(subject, None));
        assert!(!assignment.covers(ActorId::new(), None));
    }

    #[test]
    fn test_region_assignment_covers() {
        let region = RegionId::new();
        let assignment = Assignment::new(
            ActorId::new(),
            AssignmentScope::Region { region },
            ActorId::new(),
            None,
        );

        assert!(assignment.covers(ActorId::new(), Some(region)));
        assert!(!assignment.covers(ActorId::new(), Some(RegionId::new())));
        assert!(!assignment.covers(ActorId::new(), None));
    }

    #[test]
    fn test_deactivated_assignment_authorizes_nothing() {
        let subject = ActorId::new();
        let mut assignment = Assignment::new(
            ActorId::new(),
            AssignmentScope::Subject { subject },
            ActorId::new(),
            None,
        );

        assignment.deactivate().unwrap();
        assert!(!assignment.covers(subject, None));
        assert!(assignment.deactivated_at.is_some());

        assert!(assignment.deactivate().is_err());
        assignment.reactivate().unwrap();
        assert!(assignment.covers(subject, None));
        assert!(assignment.reactivate().is_err());
    }
}
