//! Port for project persistence and paged project search.

use async_trait::async_trait;
use pagination::PageRequest;

use chrono::{DateTime, Utc};

use crate::domain::{
    KeywordFilter, Project, ProjectBookmark, ProjectFilterType, ProjectId, ProjectSortKey,
    SortOrder, UserId,
};

use super::RepositoryError;

/// Criteria for a paged project search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSearch {
    /// Keyword filter applied on top of the completion predicate.
    pub filter: KeywordFilter<ProjectFilterType>,
    /// Only projects whose completion flag equals this value match.
    pub is_completed: bool,
    /// Requested ordering.
    pub sort: SortOrder<ProjectSortKey>,
}

/// Port for reading and writing projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert or replace a project.
    async fn save(&self, project: &Project) -> Result<(), RepositoryError>;

    /// Find a project by id.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;

    /// Remove a project. Missing projects are ignored.
    async fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError>;

    /// Run a paged search and return at most `page.peek_limit()` projects so
    /// callers can tell whether another page exists.
    async fn search(
        &self,
        search: &ProjectSearch,
        page: PageRequest,
    ) -> Result<Vec<Project>, RepositoryError>;

    /// Projects owned by `owner`, newest first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, RepositoryError>;

    /// Projects bookmarked by `user_id`, newest first.
    async fn find_bookmarked_by(&self, user_id: &UserId)
    -> Result<Vec<Project>, RepositoryError>;

    /// Add `bookmark` to the project or refresh the holder's existing entry
    /// in place, as one atomic write. Returns `false` when the project does
    /// not exist.
    async fn put_bookmark(
        &self,
        id: &ProjectId,
        bookmark: &ProjectBookmark,
    ) -> Result<bool, RepositoryError>;

    /// Drop `user_id`'s bookmark as one atomic write. Returns `false` when
    /// the project does not exist.
    async fn remove_bookmark(
        &self,
        id: &ProjectId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
}
