//! Notification contract
//!
//! State transitions emit notifications as a fire-and-forget side effect.
//! Delivery is best-effort: a dispatch failure is logged and swallowed by the
//! engine, duplicate delivery must be tolerated by recipients, and nothing on
//! the transition's critical path waits for the dispatcher.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::{ActorId, NotificationId};
use crate::ports::{EntityRef, StoreError};

/// Notification type tags, mirrored by recipient inbox filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    VisitScheduled,
    VisitStarted,
    VisitCompleted,
    VisitCancelled,
    CompletionAccepted,
    CompletionDeclined,
    ReportSubmitted,
    ReportReviewed,
    ComplaintAssigned,
    ComplaintResolved,
    AssignmentCreated,
    MonthlyReportReviewed,
    General,
}

/// A message addressed to one recipient
///
/// Mutable only through the single mark-read transition; everything else is
/// written once at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: ActorId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related: Option<EntityRef>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification
    pub fn new(
        recipient: ActorId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related: Option<EntityRef>,
    ) -> Self {
        Self {
            id: NotificationId::new_v7(),
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            related,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Marks the notification read; repeated calls keep the first timestamp
    pub fn mark_read(&mut self) {
        if !self.is_read {
            self.is_read = true;
            self.read_at = Some(Utc::now());
        }
    }
}

/// Errors raised by a notification dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Dispatch failed: {0}")]
    Failed(String),
}

/// Fire-and-forget delivery channel consumed by the engine
///
/// Implementations must not block the caller on delivery; at-least-once is
/// acceptable.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError>;
}

/// Recipient inbox operations
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn get(&self, id: NotificationId) -> Result<Notification, StoreError>;

    /// All notifications for one recipient, newest first
    async fn find_for_recipient(&self, recipient: ActorId)
        -> Result<Vec<Notification>, StoreError>;

    async fn update(&self, notification: &Notification) -> Result<Notification, StoreError>;

    async fn delete(&self, id: NotificationId) -> Result<(), StoreError>;
}
