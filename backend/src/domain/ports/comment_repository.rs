//! Port for project comments and thread assembly.

use async_trait::async_trait;

use crate::domain::{CommentId, CommentThread, ProjectComment, ProjectId};

use super::RepositoryError;

/// Port for reading and writing project comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert or replace a comment.
    async fn save(&self, comment: &ProjectComment) -> Result<(), RepositoryError>;

    /// Find a comment by id.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<ProjectComment>, RepositoryError>;

    /// Visible threads of a project, newest root first.
    ///
    /// Each thread carries its live replies; deleted roots appear only while
    /// they have at least one live reply.
    async fn find_threads(&self, project_id: &ProjectId)
    -> Result<Vec<CommentThread>, RepositoryError>;

    /// Remove every comment of a project.
    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError>;
}
