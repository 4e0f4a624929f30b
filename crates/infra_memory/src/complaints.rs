//! In-memory complaint store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ComplaintId, StoreError};
use domain_complaint::{Complaint, ComplaintFilter, ComplaintStore};

/// Complaint store backed by a versioned in-memory table
#[derive(Debug, Default)]
pub struct MemoryComplaintStore {
    records: RwLock<HashMap<ComplaintId, Complaint>>,
}

impl MemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn get(&self, id: ComplaintId) -> Result<Complaint, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Complaint", id))
    }

    async fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        let records = self.records.read().await;
        let mut complaints: Vec<Complaint> = records
            .values()
            .filter(|complaint| filter.matches(complaint))
            .cloned()
            .collect();
        complaints.sort_by(|a, b| b.filed_at.cmp(&a.filed_at));
        Ok(complaints)
    }

    async fn insert(&self, complaint: &Complaint) -> Result<Complaint, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&complaint.id) {
            return Err(StoreError::conflict("Complaint", complaint.id));
        }
        records.insert(complaint.id, complaint.clone());
        Ok(complaint.clone())
    }

    async fn update(&self, complaint: &Complaint) -> Result<Complaint, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&complaint.id)
            .ok_or_else(|| StoreError::not_found("Complaint", complaint.id))?;
        if stored.version != complaint.version {
            return Err(StoreError::conflict("Complaint", complaint.id));
        }
        let mut next = complaint.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }
}
