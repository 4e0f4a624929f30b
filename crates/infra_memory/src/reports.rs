//! In-memory report store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ReportId, StoreError};
use domain_report::{Report, ReportFilter, ReportStore};

/// Report store backed by a versioned in-memory table
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    records: RwLock<HashMap<ReportId, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn get(&self, id: ReportId) -> Result<Report, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Report", id))
    }

    async fn find(&self, filter: &ReportFilter) -> Result<Vec<Report>, StoreError> {
        let records = self.records.read().await;
        let mut reports: Vec<Report> = records
            .values()
            .filter(|report| filter.matches(report))
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(reports)
    }

    async fn insert(&self, report: &Report) -> Result<Report, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&report.id) {
            return Err(StoreError::conflict("Report", report.id));
        }
        records.insert(report.id, report.clone());
        Ok(report.clone())
    }

    async fn update(&self, report: &Report) -> Result<Report, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&report.id)
            .ok_or_else(|| StoreError::not_found("Report", report.id))?;
        if stored.version != report.version {
            return Err(StoreError::conflict("Report", report.id));
        }
        let mut next = report.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }
}
