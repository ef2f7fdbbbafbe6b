//! Driving ports for notifications.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, Subscription, UserId};

/// Driving port for notification mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Mark one of the requester's notifications as read.
    async fn mark_read(
        &self,
        requester: &UserId,
        notification_id: &NotificationId,
    ) -> Result<Notification, Error>;
}

/// Driving port for notification reads and live delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    /// The requester's notifications, newest first.
    async fn list_notifications(&self, requester: &UserId) -> Result<Vec<Notification>, Error>;

    /// Number of unread notifications for the requester.
    async fn unread_count(&self, requester: &UserId) -> Result<u64, Error>;

    /// Open a live feed of notifications emitted for `user_id` from now on.
    fn subscribe(&self, user_id: UserId) -> Subscription;
}
