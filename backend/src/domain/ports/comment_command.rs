//! Driving ports for project comments.

use async_trait::async_trait;

use crate::domain::{CommentId, CommentThread, Error, ProjectComment, ProjectId, UserId};

/// Driving port for comment write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Post a comment. With `parent_id` the comment is a reply, and the parent
    /// must be a top-level comment of the same project.
    async fn create_comment(
        &self,
        author: &UserId,
        project_id: &ProjectId,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Result<ProjectComment, Error>;

    /// Replace the content of the requester's own comment.
    async fn edit_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
        content: String,
    ) -> Result<ProjectComment, Error>;

    /// Soft-delete the requester's own comment.
    async fn delete_comment(&self, requester: &UserId, comment_id: &CommentId)
    -> Result<(), Error>;

    /// Like a comment; repeated likes are ignored.
    async fn like_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
    ) -> Result<ProjectComment, Error>;

    /// Withdraw a like; missing likes are ignored.
    async fn unlike_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
    ) -> Result<ProjectComment, Error>;
}

/// Driving port for comment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentQuery: Send + Sync {
    /// Visible comment threads of a project, newest first.
    async fn list_threads(&self, project_id: &ProjectId) -> Result<Vec<CommentThread>, Error>;
}
