//! Report store port

use async_trait::async_trait;

use core_kernel::{ActorId, ReportId, StoreError, VisitId};

use crate::report::{Report, ReviewStatus};

/// Filter for report lookups
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub visit_id: Option<VisitId>,
    pub field_actor: Option<ActorId>,
    pub subject: Option<ActorId>,
    pub review_status: Option<ReviewStatus>,
}

impl ReportFilter {
    pub fn for_visit(visit_id: VisitId) -> Self {
        Self {
            visit_id: Some(visit_id),
            ..Self::default()
        }
    }

    pub fn for_field_actor(field_actor: ActorId) -> Self {
        Self {
            field_actor: Some(field_actor),
            ..Self::default()
        }
    }

    pub fn for_subject(subject: ActorId) -> Self {
        Self {
            subject: Some(subject),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.review_status = Some(status);
        self
    }

    /// Returns true if the report matches every set field
    pub fn matches(&self, report: &Report) -> bool {
        self.visit_id.map_or(true, |v| report.visit_id == v)
            && self.field_actor.map_or(true, |a| report.field_actor == a)
            && self.subject.map_or(true, |a| report.subject == a)
            && self.review_status.map_or(true, |s| report.review_status == s)
    }
}

/// Durable storage for reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn get(&self, id: ReportId) -> Result<Report, StoreError>;

    async fn find(&self, filter: &ReportFilter) -> Result<Vec<Report>, StoreError>;

    async fn insert(&self, report: &Report) -> Result<Report, StoreError>;

    /// Commits a read-modify-write; fails with `Conflict` on a lost race
    async fn update(&self, report: &Report) -> Result<Report, StoreError>;
}
