//! Driving ports for project applications.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, ProjectMember, ProjectTryout, ResumeId, TryoutId, UserId};

/// Driving port for tryout write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryoutCommand: Send + Sync {
    /// Apply to `project_id` for `position_name` with one of the applicant's
    /// resumes. Owners cannot apply to their own project and nobody may apply
    /// twice to the same project.
    async fn apply(
        &self,
        applicant: &UserId,
        project_id: &ProjectId,
        resume_id: &ResumeId,
        position_name: String,
    ) -> Result<ProjectTryout, Error>;

    /// Accept an in-review tryout; only the project owner may decide.
    async fn accept(&self, requester: &UserId, tryout_id: &TryoutId)
    -> Result<ProjectMember, Error>;

    /// Reject an in-review tryout; only the project owner may decide.
    async fn reject(&self, requester: &UserId, tryout_id: &TryoutId)
    -> Result<ProjectTryout, Error>;
}

/// Driving port for tryout reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryoutQuery: Send + Sync {
    /// Tryouts submitted to a project; owner only.
    async fn list_project_tryouts(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectTryout>, Error>;

    /// Tryouts the requester submitted.
    async fn list_my_tryouts(&self, requester: &UserId) -> Result<Vec<ProjectTryout>, Error>;
}
