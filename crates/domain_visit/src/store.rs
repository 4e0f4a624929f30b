//! Visit store port

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ActorId, ReportingMonth, StoreError, VisitId};

use crate::visit::{Visit, VisitStatus};

/// Filter for visit lookups
///
/// All fields are conjunctive; `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct VisitFilter {
    pub field_actor: Option<ActorId>,
    pub overseer: Option<ActorId>,
    pub subject: Option<ActorId>,
    pub status: Option<VisitStatus>,
    pub month: Option<ReportingMonth>,
    /// Only visits scheduled on or after this date
    pub scheduled_on_or_after: Option<NaiveDate>,
}

impl VisitFilter {
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

    pub fn with_status(mut self, status: VisitStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn in_month(mut self, month: ReportingMonth) -> Self {
        self.month = Some(month);
        self
    }

    pub fn on_or_after(mut self, date: NaiveDate) -> Self {
        self.scheduled_on_or_after = Some(date);
        self
    }

    /// Returns true if the visit matches every set field
    pub fn matches(&self, visit: &Visit) -> bool {
        self.field_actor.map_or(true, |a| visit.field_actor == a)
            && self.overseer.map_or(true, |a| visit.overseer == a)
            && self.subject.map_or(true, |a| visit.subject == a)
            && self.status.map_or(true, |s| visit.status == s)
            && self.month.map_or(true, |m| m.contains(visit.scheduled_date))
            && self
                .scheduled_on_or_after
                .map_or(true, |d| visit.scheduled_date >= d)
    }
}

/// Durable storage for visits
///
/// `update` must be atomic at the single-record level and reject writes whose
/// version no longer matches the stored record.
#[async_trait]
pub trait VisitStore: Send + Sync {
    async fn get(&self, id: VisitId) -> Result<Visit, StoreError>;

    async fn find(&self, filter: &VisitFilter) -> Result<Vec<Visit>, StoreError>;

    async fn insert(&self, visit: &Visit) -> Result<Visit, StoreError>;

    /// Commits a read-modify-write; fails with `Conflict` on a lost race
    async fn update(&self, visit: &Visit) -> Result<Visit, StoreError>;
}
