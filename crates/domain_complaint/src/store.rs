//! Complaint store port

use async_trait::async_trait;

use core_kernel::{ActorId, ComplaintId, StoreError};

use crate::complaint::{Complaint, ComplaintStatus};

/// Filter for complaint lookups
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub subject: Option<ActorId>,
    pub filed_by: Option<ActorId>,
    pub assigned_to: Option<ActorId>,
    pub status: Option<ComplaintStatus>,
}

impl ComplaintFilter {
    pub fn for_subject(subject: ActorId) -> Self {
        Self {
            subject: Some(subject),
            ..Self::default()
        }
    }

    pub fn assigned_to(field_actor: ActorId) -> Self {
        Self {
            assigned_to: Some(field_actor),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the complaint matches every set field
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.subject.map_or(true, |a| complaint.subject == a)
            && self.filed_by.map_or(true, |a| complaint.filed_by == a)
            && self
                .assigned_to
                .map_or(true, |a| complaint.assigned_to == Some(a))
            && self.status.map_or(true, |s| complaint.status == s)
    }
}

/// Durable storage for complaints
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    async fn get(&self, id: ComplaintId) -> Result<Complaint, StoreError>;

    async fn find(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError>;

    async fn insert(&self, complaint: &Complaint) -> Result<Complaint, StoreError>;

    /// Commits a read-modify-write; fails with `Conflict` on a lost race
    async fn update(&self, complaint: &Complaint) -> Result<Complaint, StoreError>;
}
