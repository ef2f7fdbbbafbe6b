//! Persist-then-push helper used by services that raise notifications.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::domain::ports::{NotificationPublisher, NotificationRepository, map_repository_error};
use crate::domain::{Error, Notification, NotificationId, NotificationType, ProjectId, UserId};

/// Writes a notification and hands it to the live publisher.
#[derive(Clone)]
pub struct Notifier {
    repository: Arc<dyn NotificationRepository>,
    publisher: Arc<dyn NotificationPublisher>,
    clock: Arc<dyn Clock>,
}

impl Notifier {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        publisher: Arc<dyn NotificationPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            publisher,
            clock,
        }
    }

    /// Persist a notification for `target` and push it to live subscribers.
    ///
    /// The push happens only after the write succeeds, so subscribers never
    /// see a notification the list endpoint cannot return.
    pub async fn notify(
        &self,
        kind: NotificationType,
        target: UserId,
        project_id: Option<ProjectId>,
    ) -> Result<Notification, Error> {
        let notification = Notification::new(
            NotificationId::random(),
            kind,
            target,
            project_id,
            self.clock.utc(),
        );
        self.repository
            .save(&notification)
            .await
            .map_err(|err| map_repository_error("notification", err))?;
        self.publisher.publish(&notification);
        Ok(notification)
    }

    /// Like [`Notifier::notify`] but logs failures instead of returning them,
    /// for side effects that must not undo the triggering action.
    pub async fn notify_best_effort(
        &self,
        kind: NotificationType,
        target: UserId,
        project_id: Option<ProjectId>,
    ) {
        if let Err(err) = self.notify(kind, target, project_id).await {
            warn!(user_id = %target, kind = kind.as_str(), error = %err, "notification dropped");
        }
    }
}
