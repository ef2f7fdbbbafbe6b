//! Tryout domain service.
//!
//! Applicants apply with one of their own resumes; the project owner then
//! accepts or rejects. Every transition notifies the other party.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    MemberRepository, ProjectRepository, RepositoryError, ResumeRepository, TryoutCommand,
    TryoutQuery, TryoutRepository, map_repository_error,
};
use crate::domain::{
    ApplicantProfile, Error, MemberId, NotificationType, Notifier, Project, ProjectId,
    ProjectMember, ProjectTryout, ResumeId, TryoutId, UserId,
};

fn store_error(err: RepositoryError) -> Error {
    map_repository_error("tryout", err)
}

/// Tryout service implementing [`TryoutCommand`] and [`TryoutQuery`].
#[derive(Clone)]
pub struct TryoutService<T, M, P, R> {
    tryouts: Arc<T>,
    members: Arc<M>,
    projects: Arc<P>,
    resumes: Arc<R>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
}

impl<T, M, P, R> TryoutService<T, M, P, R> {
    pub fn new(
        tryouts: Arc<T>,
        members: Arc<M>,
        projects: Arc<P>,
        resumes: Arc<R>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tryouts,
            members,
            projects,
            resumes,
            notifier,
            clock,
        }
    }
}

impl<T, M, P, R> TryoutService<T, M, P, R>
where
    T: TryoutRepository,
    P: ProjectRepository,
{
    async fn load_project(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(|err| map_repository_error("project", err))?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    /// Load a tryout together with its project, requiring project ownership.
    async fn load_for_owner(
        &self,
        requester: &UserId,
        tryout_id: &TryoutId,
    ) -> Result<(ProjectTryout, Project), Error> {
        let tryout = self
            .tryouts
            .find_by_id(tryout_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| Error::not_found(format!("tryout {tryout_id} not found")))?;
        let project = self.load_project(&tryout.project_id()).await?;
        if !project.is_owned_by(requester) {
            return Err(Error::forbidden("only the project owner may decide tryouts"));
        }
        Ok((tryout, project))
    }
}

#[async_trait]
impl<T, M, P, R> TryoutCommand for TryoutService<T, M, P, R>
where
    T: TryoutRepository,
    M: MemberRepository,
    P: ProjectRepository,
    R: ResumeRepository,
{
    async fn apply(
        &self,
        applicant: &UserId,
        project_id: &ProjectId,
        resume_id: &ResumeId,
        position_name: String,
    ) -> Result<ProjectTryout, Error> {
        let project = self.load_project(project_id).await?;
        if project.is_owned_by(applicant) {
            return Err(Error::invalid_request("owners cannot apply to their own project"));
        }
        if project.is_completed() {
            return Err(Error::conflict(format!("project {project_id} is completed")));
        }
        if !project.recruits(&position_name) {
            return Err(Error::invalid_request(format!(
                "project does not recruit `{position_name}`"
            )));
        }

        let resume = self
            .resumes
            .find_by_id(resume_id)
            .await
            .map_err(|err| map_repository_error("resume", err))?
            .ok_or_else(|| Error::not_found(format!("resume {resume_id} not found")))?;
        if !resume.is_owned_by(applicant) {
            return Err(Error::forbidden("tryouts must use one of your own resumes"));
        }

        let already_applied = self
            .tryouts
            .exists_for(project_id, applicant)
            .await
            .map_err(store_error)?;
        if already_applied {
            return Err(Error::conflict("already applied to this project"));
        }

        let owner = resume.owner();
        let profile = ApplicantProfile {
            user_id: *applicant,
            nickname: owner.nickname.clone(),
            self_description: Some(resume.content().self_description.clone())
                .filter(|text| !text.is_empty()),
            profile_image_url: owner.profile_image_url.clone(),
        };
        let tryout = ProjectTryout::apply(
            TryoutId::random(),
            *resume_id,
            profile,
            *project_id,
            position_name,
            self.clock.utc(),
        );
        self.tryouts.save(&tryout).await.map_err(store_error)?;
        info!(tryout_id = %tryout.id(), %project_id, "tryout submitted");

        self.notifier
            .notify_best_effort(
                NotificationType::TryoutSubmitted,
                *project.user_id(),
                Some(*project_id),
            )
            .await;
        Ok(tryout)
    }

    async fn accept(
        &self,
        requester: &UserId,
        tryout_id: &TryoutId,
    ) -> Result<ProjectMember, Error> {
        let (mut tryout, _) = self.load_for_owner(requester, tryout_id).await?;
        // Keyed by the tryout so a retried acceptance replaces, not duplicates.
        let member_id = MemberId::from_uuid(*tryout_id.as_uuid());
        let member = tryout
            .accept(member_id, self.clock.utc())
            .map_err(|err| Error::conflict(err.to_string()))?;
        // The tryout stays INREVIEW until its member exists.
        self.members
            .save(&member)
            .await
            .map_err(|err| map_repository_error("member", err))?;
        self.tryouts.save(&tryout).await.map_err(store_error)?;
        info!(%tryout_id, member_id = %member.id(), "tryout accepted");

        self.notifier
            .notify_best_effort(
                NotificationType::TryoutAccepted,
                tryout.applicant().user_id,
                Some(tryout.project_id()),
            )
            .await;
        Ok(member)
    }

    async fn reject(
        &self,
        requester: &UserId,
        tryout_id: &TryoutId,
    ) -> Result<ProjectTryout, Error> {
        let (mut tryout, _) = self.load_for_owner(requester, tryout_id).await?;
        tryout
            .reject()
            .map_err(|err| Error::conflict(err.to_string()))?;
        self.tryouts.save(&tryout).await.map_err(store_error)?;

        self.notifier
            .notify_best_effort(
                NotificationType::TryoutRejected,
                tryout.applicant().user_id,
                Some(tryout.project_id()),
            )
            .await;
        Ok(tryout)
    }
}

#[async_trait]
impl<T, M, P, R> TryoutQuery for TryoutService<T, M, P, R>
where
    T: TryoutRepository,
    M: MemberRepository,
    P: ProjectRepository,
    R: ResumeRepository,
{
    async fn list_project_tryouts(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectTryout>, Error> {
        let project = self.load_project(project_id).await?;
        if !project.is_owned_by(requester) {
            return Err(Error::forbidden("only the project owner may list tryouts"));
        }
        self.tryouts
            .find_by_project(project_id)
            .await
            .map_err(store_error)
    }

    async fn list_my_tryouts(&self, requester: &UserId) -> Result<Vec<ProjectTryout>, Error> {
        self.tryouts
            .find_by_applicant(requester)
            .await
            .map_err(store_error)
    }
}

#[cfg(test)]
#[path = "tryout_service_tests.rs"]
mod tests;
