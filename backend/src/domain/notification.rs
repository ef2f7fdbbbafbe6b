//! Persisted user notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{NotificationId, ProjectId, UserId};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Someone applied to a project the target owns.
    TryoutSubmitted,
    /// The target's application was accepted.
    TryoutAccepted,
    /// The target's application was rejected.
    TryoutRejected,
    /// Someone commented on a project the target owns.
    CommentAdded,
}

impl NotificationType {
    /// Stable stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TryoutSubmitted => "TRYOUT_SUBMITTED",
            Self::TryoutAccepted => "TRYOUT_ACCEPTED",
            Self::TryoutRejected => "TRYOUT_REJECTED",
            Self::CommentAdded => "COMMENT_ADDED",
        }
    }

    /// Parse the stored representation.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "TRYOUT_SUBMITTED" => Some(Self::TryoutSubmitted),
            "TRYOUT_ACCEPTED" => Some(Self::TryoutAccepted),
            "TRYOUT_REJECTED" => Some(Self::TryoutRejected),
            "COMMENT_ADDED" => Some(Self::CommentAdded),
            _ => None,
        }
    }
}

/// A notification addressed to one user.
///
/// Only [`Notification::mark_read`] mutates it after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[schema(value_type = String)]
    pub(crate) id: NotificationId,
    #[serde(rename = "type")]
    pub(crate) kind: NotificationType,
    #[schema(value_type = String)]
    pub(crate) target_user_id: UserId,
    #[schema(value_type = Option<String>)]
    pub(crate) project_id: Option<ProjectId>,
    pub(crate) is_read: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        id: NotificationId,
        kind: NotificationType,
        target_user_id: UserId,
        project_id: Option<ProjectId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            target_user_id,
            project_id,
            is_read: false,
            created_at: now,
        }
    }

    /// Flag the notification as read. Idempotent.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Notification identifier.
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Event that produced the notification.
    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    /// User the notification is addressed to.
    pub fn target_user_id(&self) -> &UserId {
        &self.target_user_id
    }

    /// Project the event concerns, if any.
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Whether the target has read it.
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    /// When the event happened.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
