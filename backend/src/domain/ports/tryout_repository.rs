//! Ports for project applications and memberships.

use async_trait::async_trait;

use crate::domain::{ProjectId, ProjectMember, ProjectTryout, TryoutId, UserId};

use super::RepositoryError;

/// Port for reading and writing tryouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryoutRepository: Send + Sync {
    /// Insert or replace a tryout.
    async fn save(&self, tryout: &ProjectTryout) -> Result<(), RepositoryError>;

    /// Find a tryout by id.
    async fn find_by_id(&self, id: &TryoutId) -> Result<Option<ProjectTryout>, RepositoryError>;

    /// Tryouts submitted to a project, newest first.
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectTryout>, RepositoryError>;

    /// Tryouts submitted by a user, newest first.
    async fn find_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<ProjectTryout>, RepositoryError>;

    /// Whether `applicant` already applied to `project_id`.
    async fn exists_for(
        &self,
        project_id: &ProjectId,
        applicant: &UserId,
    ) -> Result<bool, RepositoryError>;

    /// Remove every tryout of a project.
    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError>;
}

/// Port for reading and writing project members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert or replace a member.
    async fn save(&self, member: &ProjectMember) -> Result<(), RepositoryError>;

    /// Members of a project, oldest first.
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, RepositoryError>;

    /// Remove every member of a project.
    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError>;
}
