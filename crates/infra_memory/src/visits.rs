//! In-memory visit store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{StoreError, VisitId};
use domain_visit::{Visit, VisitFilter, VisitStore};

/// Visit store backed by a versioned in-memory table
#[derive(Debug, Default)]
pub struct MemoryVisitStore {
    records: RwLock<HashMap<VisitId, Visit>>,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn get(&self, id: VisitId) -> Result<Visit, StoreError> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Visit", id))
    }

    async fn find(&self, filter: &VisitFilter) -> Result<Vec<Visit>, StoreError> {
        let records = self.records.read().await;
        let mut visits: Vec<Visit> = records
            .values()
            .filter(|visit| filter.matches(visit))
            .cloned()
            .collect();
        visits.sort_by(|a, b| {
            b.scheduled_date
                .cmp(&a.scheduled_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(visits)
    }

    async fn insert(&self, visit: &Visit) -> Result<Visit, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&visit.id) {
            return Err(StoreError::conflict("Visit", visit.id));
        }
        records.insert(visit.id, visit.clone());
        Ok(visit.clone())
    }

    async fn update(&self, visit: &Visit) -> Result<Visit, StoreError> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&visit.id)
            .ok_or_else(|| StoreError::not_found("Visit", visit.id))?;
        if stored.version != visit.version {
            return Err(StoreError::conflict("Visit", visit.id));
        }
        let mut next = visit.clone();
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::ActorId;
    use domain_visit::visit::ScheduleVisit;
    use domain_visit::VisitPurpose;

    fn visit() -> Visit {
        let overseer = ActorId::new();
        Visit::schedule(
            ScheduleVisit {
                subject: ActorId::new(),
                field_actor: ActorId::new(),
                overseer,
                region: None,
                related_complaint: None,
                scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                scheduled_time: None,
                duration_minutes: 60,
                purpose: VisitPurpose::Routine,
                objectives: "routine".to_string(),
                opening_notes: String::new(),
            },
            overseer,
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryVisitStore::new();
        let visit = visit();
        store.insert(&visit).await.unwrap();

        let fetched = store.get(visit.id).await.unwrap();
        assert_eq!(fetched.id, visit.id);
        assert!(store.get(VisitId::new()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let store = MemoryVisitStore::new();
        let visit = visit();
        store.insert(&visit).await.unwrap();

        // first writer wins and bumps the version
        let mut first = store.get(visit.id).await.unwrap();
        first.start("on site").unwrap();
        store.update(&first).await.unwrap();

        // second writer still holds the original version
        let mut second = visit.clone();
        second.cancel("racing cancel").unwrap();
        let result = store.update(&second).await;
        assert!(result.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_find_filters() {
        let store = MemoryVisitStore::new();
        let first = visit();
        let actor = first.field_actor;
        store.insert(&first).await.unwrap();
        store.insert(&visit()).await.unwrap();

        let found = store
            .find(&VisitFilter::for_field_actor(actor))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field_actor, actor);
    }
}
