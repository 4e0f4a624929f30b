//! Best-effort notification emission

use core_kernel::Notification;

use crate::engine::WorkflowEngine;

impl WorkflowEngine {
    /// Dispatches a notification, swallowing delivery failures
    ///
    /// A failed dispatch must never roll back or fail the transition that
    /// triggered it; it is logged and dropped.
    pub(crate) async fn emit(&self, notification: Notification) {
        let kind = notification.kind;
        if let Err(err) = self.svc.dispatcher.dispatch(notification).await {
            tracing::warn!(?kind, error = %err, "notification dispatch failed");
        }
    }
}
