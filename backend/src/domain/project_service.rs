//! Project domain service.
//!
//! Implements the project driving ports: ownership checks, validation,
//! bookmark mutations and the cascade on delete. Searches return slices
//! assembled from the repository's peeked results.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageRequest, Slice};
use tracing::info;

use crate::domain::ports::{
    CommentRepository, MemberRepository, ProjectCommand, ProjectQuery, ProjectRepository,
    ProjectSearch, ProjectView, RepositoryError, TryoutRepository, map_repository_error,
};
use crate::domain::{
    Error, Project, ProjectBookmark, ProjectDraft, ProjectId, ProjectMember, UserId,
};

fn store_error(err: RepositoryError) -> Error {
    map_repository_error("project", err)
}

/// Project service implementing [`ProjectCommand`] and [`ProjectQuery`].
#[derive(Clone)]
pub struct ProjectService<P, C, T, M> {
    projects: Arc<P>,
    comments: Arc<C>,
    tryouts: Arc<T>,
    members: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<P, C, T, M> ProjectService<P, C, T, M> {
    pub fn new(
        projects: Arc<P>,
        comments: Arc<C>,
        tryouts: Arc<T>,
        members: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            comments,
            tryouts,
            members,
            clock,
        }
    }
}

impl<P, C, T, M> ProjectService<P, C, T, M>
where
    P: ProjectRepository,
{
    async fn load(&self, project_id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    async fn load_owned(&self, requester: &UserId, project_id: &ProjectId) -> Result<Project, Error> {
        let project = self.load(project_id).await?;
        if !project.is_owned_by(requester) {
            return Err(Error::forbidden("only the project owner may do this"));
        }
        Ok(project)
    }

    async fn save(&self, project: &Project) -> Result<(), Error> {
        self.projects.save(project).await.map_err(store_error)
    }
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid project: {err}"))
}

#[async_trait]
impl<P, C, T, M> ProjectCommand for ProjectService<P, C, T, M>
where
    P: ProjectRepository,
    C: CommentRepository,
    T: TryoutRepository,
    M: MemberRepository,
{
    async fn create_project(&self, owner: &UserId, draft: ProjectDraft) -> Result<Project, Error> {
        let project = Project::create(ProjectId::random(), *owner, draft, self.clock.utc())
            .map_err(invalid)?;
        self.save(&project).await?;
        info!(project_id = %project.id(), owner = %owner, "project created");
        Ok(project)
    }

    async fn update_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        draft: ProjectDraft,
    ) -> Result<Project, Error> {
        let mut project = self.load_owned(requester, project_id).await?;
        project.update(draft, self.clock.utc()).map_err(invalid)?;
        self.save(&project).await?;
        Ok(project)
    }

    async fn delete_project(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error> {
        self.load_owned(requester, project_id).await?;
        self.comments
            .delete_by_project(project_id)
            .await
            .map_err(|err| map_repository_error("comment", err))?;
        self.tryouts
            .delete_by_project(project_id)
            .await
            .map_err(|err| map_repository_error("tryout", err))?;
        self.members
            .delete_by_project(project_id)
            .await
            .map_err(|err| map_repository_error("member", err))?;
        self.projects.delete(project_id).await.map_err(store_error)?;
        info!(%project_id, "project deleted");
        Ok(())
    }

    async fn complete_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<Project, Error> {
        let mut project = self.load_owned(requester, project_id).await?;
        project.complete(self.clock.utc());
        self.save(&project).await?;
        Ok(project)
    }

    async fn add_bookmark(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error> {
        let bookmark = ProjectBookmark {
            user_id: *requester,
            added_at: self.clock.utc(),
        };
        let found = self
            .projects
            .put_bookmark(project_id, &bookmark)
            .await
            .map_err(store_error)?;
        found
            .then_some(())
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    async fn remove_bookmark(&self, requester: &UserId, project_id: &ProjectId) -> Result<(), Error> {
        let found = self
            .projects
            .remove_bookmark(project_id, requester, self.clock.utc())
            .await
            .map_err(store_error)?;
        found
            .then_some(())
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }
}

#[async_trait]
impl<P, C, T, M> ProjectQuery for ProjectService<P, C, T, M>
where
    P: ProjectRepository,
    C: CommentRepository,
    T: TryoutRepository,
    M: MemberRepository,
{
    async fn get_project(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
    ) -> Result<ProjectView, Error> {
        let project = self.load(project_id).await?;
        Ok(ProjectView::for_requester(project, requester))
    }

    async fn search_projects(
        &self,
        requester: &UserId,
        search: ProjectSearch,
        page: PageRequest,
    ) -> Result<Slice<ProjectView>, Error> {
        let peeked = self
            .projects
            .search(&search, page)
            .await
            .map_err(store_error)?;
        Ok(Slice::from_peeked(peeked, page)
            .map(|project| ProjectView::for_requester(project, requester)))
    }

    async fn list_own_projects(&self, requester: &UserId) -> Result<Vec<ProjectView>, Error> {
        let projects = self
            .projects
            .find_by_owner(requester)
            .await
            .map_err(store_error)?;
        Ok(projects
            .into_iter()
            .map(|project| ProjectView::for_requester(project, requester))
            .collect())
    }

    async fn list_bookmarked_projects(&self, requester: &UserId) -> Result<Vec<ProjectView>, Error> {
        let projects = self
            .projects
            .find_bookmarked_by(requester)
            .await
            .map_err(store_error)?;
        Ok(projects
            .into_iter()
            .map(|project| ProjectView {
                project,
                is_bookmarked: true,
            })
            .collect())
    }

    async fn list_members(&self, project_id: &ProjectId) -> Result<Vec<ProjectMember>, Error> {
        self.load(project_id).await?;
        self.members
            .find_by_project(project_id)
            .await
            .map_err(|err| map_repository_error("member", err))
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
