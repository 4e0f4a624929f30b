//! In-memory notification delivery and inbox

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::notify::{
    DispatchError, Notification, NotificationDispatcher, NotificationStore,
};
use core_kernel::{ActorId, NotificationId, StoreError};

/// Dispatcher that delivers straight into recipient inboxes
///
/// Serves as both the delivery channel and the inbox store; duplicate
/// delivery simply lands twice, which recipients must tolerate anyway.
#[derive(Debug, Default)]
pub struct InboxDispatcher {
    inbox: RwLock<HashMap<NotificationId, Notification>>,
    fail_delivery: AtomicBool,
}

impl InboxDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent dispatches fail, for exercising the best-effort
    /// contract
    pub fn set_failing(&self, failing: bool) {
        self.fail_delivery.store(failing, Ordering::SeqCst);
    }

    /// Number of delivered notifications, across all recipients
    pub async fn delivered_count(&self) -> usize {
        self.inbox.read().await.len()
    }
}

#[async_trait]
impl NotificationDispatcher for InboxDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        if self.fail_delivery.load(Ordering::SeqCst) {
            return Err(DispatchError::Failed("delivery channel down".to_string()));
        }
        self.inbox
            .write()
            .await
            .insert(notification.id, notification);
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for InboxDispatcher {
    async fn get(&self, id: NotificationId) -> Result<Notification, StoreError> {
        self.inbox
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Notification", id))
    }

    async fn find_for_recipient(
        &self,
        recipient: ActorId,
    ) -> Result<Vec<Notification>, StoreError> {
        let inbox = self.inbox.read().await;
        let mut notifications: Vec<Notification> = inbox
            .values()
            .filter(|n| n.recipient == recipient)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, StoreError> {
        let mut inbox = self.inbox.write().await;
        if !inbox.contains_key(&notification.id) {
            return Err(StoreError::not_found("Notification", notification.id));
        }
        inbox.insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn delete(&self, id: NotificationId) -> Result<(), StoreError> {
        self.inbox
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Notification", id))
    }
}
