//! Monthly report store port

use async_trait::async_trait;

use core_kernel::{ActorId, MonthlyReportId, ReportingMonth, StoreError};

use crate::monthly::MonthlyReport;

/// Durable storage for monthly reports
///
/// The (field actor, month) pair is unique; `find_for_month` is how callers
/// enforce get-or-create semantics.
#[async_trait]
pub trait MonthlyReportStore: Send + Sync {
    async fn get(&self, id: MonthlyReportId) -> Result<MonthlyReport, StoreError>;

    async fn find_for_month(
        &self,
        field_actor: ActorId,
        month: ReportingMonth,
    ) -> Result<Option<MonthlyReport>, StoreError>;

    async fn find_for_field_actor(
        &self,
        field_actor: ActorId,
    ) -> Result<Vec<MonthlyReport>, StoreError>;

    async fn insert(&self, report: &MonthlyReport) -> Result<MonthlyReport, StoreError>;

    /// Commits a read-modify-write; fails with `Conflict` on a lost race
    async fn update(&self, report: &MonthlyReport) -> Result<MonthlyReport, StoreError>;
}
