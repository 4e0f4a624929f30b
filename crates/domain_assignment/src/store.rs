//! Assignment store port

use async_trait::async_trait;

use core_kernel::{ActorId, AssignmentId, StoreError};

use crate::assignment::Assignment;

/// Filter for assignment lookups
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub field_actor: Option<ActorId>,
    pub active_only: bool,
}

impl AssignmentFilter {
    pub fn for_field_actor(field_actor: ActorId) -> Self {
        Self {
            field_actor: Some(field_actor),
            active_only: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Returns true if the assignment matches every set field
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.field_actor.map_or(true, |a| assignment.field_actor == a)
            && (!self.active_only || assignment.is_active)
    }
}

/// Durable storage for assignments
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn get(&self, id: AssignmentId) -> Result<Assignment, StoreError>;

    async fn find(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError>;

    async fn insert(&self, assignment: &Assignment) -> Result<Assignment, StoreError>;

    /// Commits a read-modify-write; fails with `Conflict` on a lost race
    async fn update(&self, assignment: &Assignment) -> Result<Assignment, StoreError>;
}
