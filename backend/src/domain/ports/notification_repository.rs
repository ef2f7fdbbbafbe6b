//! Ports for persisted notifications and their live delivery.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::RepositoryError;

/// Port for reading and writing notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert or replace a notification.
    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError>;

    /// Find a notification by id.
    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError>;

    /// Notifications addressed to `user_id`, newest first.
    async fn find_by_target(&self, user_id: &UserId)
    -> Result<Vec<Notification>, RepositoryError>;

    /// Number of unread notifications addressed to `user_id`.
    async fn count_unread(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
}

/// Pushes freshly persisted notifications to live subscribers.
///
/// Publishing never fails; with no subscriber the event is dropped.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPublisher: Send + Sync {
    /// Push `notification` to the subscribers of its target user.
    fn publish(&self, notification: &Notification);
}

/// Publisher that drops every event, for wiring without live delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotificationPublisher;

impl NotificationPublisher for NoOpNotificationPublisher {
    fn publish(&self, _notification: &Notification) {}
}
