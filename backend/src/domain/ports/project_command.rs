//! Driving port for project mutations.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectDraft, ProjectId, UserId};

/// Driving port for project write operations.
///
/// Every mutation except bookmarking is restricted to the project owner and
/// fails with [`crate::domain::ErrorCode::Forbidden`] for anyone else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    /// Validate `draft` and publish a new project owned by `owner`.
    async fn create_project(&self, owner: &UserId, draft: ProjectDraft) -> Result<Project, Error>;

    /// Replace a project's content.
    async fn update_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        draft: ProjectDraft,
    ) -> Result<Project, Error>;

    /// Delete a project with its comments, tryouts and members.
    async fn delete_project(&self, requester: &UserId, project_id: &ProjectId)
    -> Result<(), Error>;

    /// Mark a project as completed.
    async fn complete_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, Error>;

    /// Bookmark a project, refreshing an existing bookmark.
    async fn add_bookmark(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error>;

    /// Remove a bookmark; succeeds when none exists.
    async fn remove_bookmark(&self, requester: &UserId, project_id: &ProjectId)
    -> Result<(), Error>;
}
