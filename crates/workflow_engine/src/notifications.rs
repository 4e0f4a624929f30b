//! Inbox operations

use core_kernel::{ActorId, Notification, NotificationId, WorkflowError};

use crate::engine::WorkflowEngine;

impl WorkflowEngine {
    /// An actor's notifications, newest first
    pub async fn notifications_for(
        &self,
        actor: ActorId,
    ) -> Result<Vec<Notification>, WorkflowError> {
        Ok(self.svc.inbox.find_for_recipient(actor).await?)
    }

    /// Marks one of the actor's notifications as read
    pub async fn mark_notification_read(
        &self,
        actor: ActorId,
        id: NotificationId,
    ) -> Result<Notification, WorkflowError> {
        let mut notification = self.owned_notification(actor, id).await?;
        notification.mark_read();
        Ok(self.svc.inbox.update(&notification).await?)
    }

    /// Deletes one of the actor's notifications
    pub async fn delete_notification(
        &self,
        actor: ActorId,
        id: NotificationId,
    ) -> Result<(), WorkflowError> {
        self.owned_notification(actor, id).await?;
        Ok(self.svc.inbox.delete(id).await?)
    }

    /// Another actor's notifications are indistinguishable from absent ones
    async fn owned_notification(
        &self,
        actor: ActorId,
        id: NotificationId,
    ) -> Result<Notification, WorkflowError> {
        let notification = self.svc.inbox.get(id).await?;
        if notification.recipient != actor {
            return Err(WorkflowError::not_found("Notification", id));
        }
        Ok(notification)
    }
}
