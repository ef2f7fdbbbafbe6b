//! Driving ports for resumes and resume bookmarks.

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::{
    Error, KeywordFilter, Resume, ResumeDraft, ResumeFilterType, ResumeId, ResumeSortKey,
    SortOrder, UserId,
};

/// A resume as seen by one requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeView {
    pub resume: Resume,
    /// Whether the requester bookmarked the resume.
    pub is_bookmarked: bool,
}

/// Driving port for resume write operations. Owner only unless noted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeCommand: Send + Sync {
    /// Write a new, inactive resume for `owner`.
    async fn create_resume(&self, owner: &UserId, draft: ResumeDraft) -> Result<Resume, Error>;

    async fn update_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
        draft: ResumeDraft,
    ) -> Result<Resume, Error>;

    async fn delete_resume(&self, requester: &UserId, resume_id: &ResumeId) -> Result<(), Error>;

    /// Activate a resume, deactivating the requester's other resumes.
    async fn activate_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<Resume, Error>;

    async fn deactivate_resume(
        &self,
        requester: &UserId,
        resume_id: &ResumeId,
    ) -> Result<Resume, Error>;

    /// Duplicate a resume into a new inactive one.
    async fn copy_resume(&self, requester: &UserId, resume_id: &ResumeId)
    -> Result<Resume, Error>;

    /// Bookmark another user's resume.
    async fn add_bookmark(&self, requester: &UserId, resume_id: &ResumeId) -> Result<(), Error>;

    /// Remove a resume bookmark; succeeds when none exists.
    async fn remove_bookmark(&self, requester: &UserId, resume_id: &ResumeId)
    -> Result<(), Error>;
}

/// Driving port for resume reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeQuery: Send + Sync {
    /// Fetch a resume. Owners see any of theirs; others only active ones.
    async fn get_resume(&self, requester: &UserId, resume_id: &ResumeId)
    -> Result<ResumeView, Error>;

    /// The requester's resumes, most recently updated first.
    async fn list_own_resumes(&self, requester: &UserId) -> Result<Vec<Resume>, Error>;

    /// Search other users' active resumes one slice at a time.
    async fn search_resumes(
        &self,
        requester: &UserId,
        filter: KeywordFilter<ResumeFilterType>,
        sort: SortOrder<ResumeSortKey>,
        page: PageRequest,
    ) -> Result<Slice<ResumeView>, Error>;

    /// Resumes the requester bookmarked, most recent bookmark first.
    async fn list_bookmarked_resumes(&self, requester: &UserId) -> Result<Vec<ResumeView>, Error>;
}
