//! Port for resume persistence and paged resume search.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{KeywordFilter, Resume, ResumeFilterType, ResumeId, ResumeSortKey, SortOrder, UserId};

use super::RepositoryError;

/// Criteria for a paged resume search.
///
/// Only active resumes whose owner differs from `requester` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSearch {
    pub filter: KeywordFilter<ResumeFilterType>,
    pub requester: UserId,
    pub sort: SortOrder<ResumeSortKey>,
}

/// Port for reading and writing resumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Insert or replace a resume.
    async fn save(&self, resume: &Resume) -> Result<(), RepositoryError>;

    /// Find a resume by id.
    async fn find_by_id(&self, id: &ResumeId) -> Result<Option<Resume>, RepositoryError>;

    /// Find every listed resume that still exists, in unspecified order.
    async fn find_by_ids(&self, ids: &[ResumeId]) -> Result<Vec<Resume>, RepositoryError>;

    /// Remove a resume. Missing resumes are ignored.
    async fn delete(&self, id: &ResumeId) -> Result<(), RepositoryError>;

    /// Resumes owned by `owner`, most recently updated first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Resume>, RepositoryError>;

    /// Run a paged search returning at most `page.peek_limit()` resumes.
    async fn search(
        &self,
        search: &ResumeSearch,
        page: PageRequest,
    ) -> Result<Vec<Resume>, RepositoryError>;
}
