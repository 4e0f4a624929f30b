//! In-memory monthly report store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ActorId, MonthlyReportId, ReportingMonth, StoreError};
use domain_reporting::{MonthlyReport, MonthlyReportStore};

/// Monthly report store backed by a versioned in-memory table
#[derive(Debug, Default)]
pub struct MemoryMonthlyReportStore {
    records: RwLock<HashMap<MonthlyReportId, MonthlyReport>>,
}

impl MemoryMonthlyReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MonthlyReportStore for MemoryMonthlyReportStore {
    async fn get(&self, id: MonthlyReportId) -> Result<MonthlyReport, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("MonthlyReport", id))
    }

    async fn find_for_month(
        &self,
        field_actor: ActorId,
        month: ReportingMonth,
    ) -> Result<Option<MonthlyReport>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.field_actor == field_actor && r.month == month)
            .cloned())
    }

    async fn find_for_field_actor(
        &self,
        field_actor: ActorId,
    ) -> Result<Vec<MonthlyReport>, StoreError> {
        let records = self.records.read().await;
        let mut reports: Vec<MonthlyReport> = records
            .values()
            .filter(|r| r.field_actor == field_actor)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(reports)
    }

    async fn insert(&self, report: &MonthlyReport) -> Result<MonthlyReport, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&report.id) {
            return Err(StoreError::conflict("MonthlyReport", report.id));
        }
        // one report per (field actor, month)
        if records
            .values()
            .any(|r| r.field_actor == report.field_actor && r.month == report.month)
        {
            return Err(StoreError::conflict("MonthlyReport", report.id));
        }
        records.insert(report.id, report.clone());
        Ok(report.clone())
    }

    async fn update(&self, report: &MonthlyReport) -> Result<MonthlyReport, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&report.id)
            .ok_or_else(|| StoreError::not_found("MonthlyReport", report.id))?;
        if stored.version != report.version {
            return Err(StoreError::conflict("MonthlyReport", report.id));
        }
        let mut next = report.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }
}
