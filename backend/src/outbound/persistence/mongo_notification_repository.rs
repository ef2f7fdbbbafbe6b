//! MongoDB-backed `NotificationRepository`.

use async_trait::async_trait;
use bson::doc;
use mongodb::Collection;

use crate::domain::ports::{NotificationRepository, RepositoryError};
use crate::domain::{Notification, NotificationId, UserId};

use super::documents::NotificationDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{by_id, collect, find_one, upsert};
use super::store::{MongoStore, NOTIFICATION_COLLECTION};

/// `NotificationRepository` over the `notification` collection.
#[derive(Clone)]
pub struct MongoNotificationRepository {
    notifications: Collection<NotificationDocument>,
}

impl MongoNotificationRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            notifications: store.collection(NOTIFICATION_COLLECTION),
        }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), RepositoryError> {
        upsert(
            &self.notifications,
            notification.id(),
            &NotificationDocument::from(notification),
        )
        .await
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        find_one(&self.notifications, by_id(id)).await
    }

    async fn find_by_target(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let cursor = self
            .notifications
            .find(doc! { "targetUserId": user_id.to_string() })
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        self.notifications
            .count_documents(doc! { "targetUserId": user_id.to_string(), "isRead": false })
            .await
            .map_err(map_mongo_error)
    }
}
