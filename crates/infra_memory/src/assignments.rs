//! In-memory assignment store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{AssignmentId, StoreError};
use domain_assignment::{Assignment, AssignmentFilter, AssignmentStore};

/// Assignment store backed by a versioned in-memory table
#[derive(Debug, Default)]
pub struct MemoryAssignmentStore {
    records: RwLock<HashMap<AssignmentId, Assignment>>,
}

impl MemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentStore for MemoryAssignmentStore {
    async fn get(&self, id: AssignmentId) -> Result<Assignment, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Assignment", id))
    }

    async fn find(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>, StoreError> {
        let records = self.records.read().await;
        let mut assignments: Vec<Assignment> = records
            .values()
            .filter(|assignment| filter.matches(assignment))
            .cloned()
            .collect();
        assignments.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(assignments)
    }

    async fn insert(&self, assignment: &Assignment) -> Result<Assignment, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&assignment.id) {
            return Err(StoreError::conflict("Assignment", assignment.id));
        }
        records.insert(assignment.id, assignment.clone());
        Ok(assignment.clone())
    }

    async fn update(&self, assignment: &Assignment) -> Result<Assignment, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&assignment.id)
            .ok_or_else(|| StoreError::not_found("Assignment", assignment.id))?;
        if stored.version != assignment.version {
            return Err(StoreError::conflict("Assignment", assignment.id));
        }
        let mut next = assignment.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }
}
