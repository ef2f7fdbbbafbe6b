//! Driving port for project reads.

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::{Error, Project, ProjectId, ProjectMember, UserId};

use super::ProjectSearch;

/// A project as seen by one requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub project: Project,
    /// Whether the requester bookmarked the project.
    pub is_bookmarked: bool,
}

impl ProjectView {
    /// Compute the requester-specific flags for `project`.
    pub fn for_requester(project: Project, requester: &UserId) -> Self {
        let is_bookmarked = project.is_bookmarked_by(requester);
        Self {
            project,
            is_bookmarked,
        }
    }
}

/// Driving port for project read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    /// Fetch one project.
    async fn get_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<ProjectView, Error>;

    /// Search projects one slice at a time.
    async fn search_projects(
        &self,
        requester: &UserId,
        search: ProjectSearch,
        page: PageRequest,
    ) -> Result<Slice<ProjectView>, Error>;

    /// Projects the requester owns, newest first.
    async fn list_own_projects(&self, requester: &UserId) -> Result<Vec<ProjectView>, Error>;

    /// Projects the requester bookmarked, newest first.
    async fn list_bookmarked_projects(&self, requester: &UserId)
    -> Result<Vec<ProjectView>, Error>;

    /// Members of a project, oldest first.
    async fn list_members(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, Error>;
}
