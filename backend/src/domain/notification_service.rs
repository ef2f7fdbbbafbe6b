//! Notification inbox and live feed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    NotificationCommand, NotificationQuery, NotificationRepository, map_repository_error,
};
use crate::domain::{Error, Notification, NotificationHub, NotificationId, Subscription, UserId};

/// Service implementing [`NotificationCommand`] and [`NotificationQuery`].
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
    hub: NotificationHub,
}

impl<N> NotificationService<N> {
    pub fn new(notifications: Arc<N>, hub: NotificationHub) -> Self {
        Self { notifications, hub }
    }
}

#[async_trait]
impl<N: NotificationRepository> NotificationCommand for NotificationService<N> {
    async fn mark_read(
        &self,
        requester: &UserId,
        notification_id: &NotificationId,
    ) -> Result<Notification, Error> {
        let mut notification = self
            .notifications
            .find_by_id(notification_id)
            .await
            .map_err(|err| map_repository_error("notification", err))?
            // Other users' notifications are reported as missing.
            .filter(|n| n.target_user_id() == requester)
            .ok_or_else(|| Error::not_found(format!("notification {notification_id} not found")))?;
        if notification.is_read() {
            return Ok(notification);
        }
        notification.mark_read();
        self.notifications
            .save(&notification)
            .await
            .map_err(|err| map_repository_error("notification", err))?;
        Ok(notification)
    }
}

#[async_trait]
impl<N: NotificationRepository> NotificationQuery for NotificationService<N> {
    async fn list_notifications(&self, requester: &UserId) -> Result<Vec<Notification>, Error> {
        let mut notifications = self
            .notifications
            .find_by_target(requester)
            .await
            .map_err(|err| map_repository_error("notification", err))?;
        notifications.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(notifications)
    }

    async fn unread_count(&self, requester: &UserId) -> Result<u64, Error> {
        self.notifications
            .count_unread(requester)
            .await
            .map_err(|err| map_repository_error("notification", err))
    }

    fn subscribe(&self, user_id: UserId) -> Subscription {
        self.hub.subscribe(user_id)
    }
}
