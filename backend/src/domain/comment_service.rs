//! Comment domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CommentCommand, CommentQuery, CommentRepository, ProjectRepository, RepositoryError,
    map_repository_error,
};
use crate::domain::{
    CommentId, CommentThread, Error, NotificationType, Notifier, ProjectComment, ProjectId, UserId,
};

/// Longest accepted comment, in characters.
pub const COMMENT_MAX_CHARS: usize = 1_000;

fn store_error(err: RepositoryError) -> Error {
    map_repository_error("comment", err)
}

fn validate_content(content: &str) -> Result<(), Error> {
    if content.trim().is_empty() {
        return Err(Error::invalid_request("comment content must not be empty"));
    }
    if content.chars().count() > COMMENT_MAX_CHARS {
        return Err(Error::invalid_request(format!(
            "comment content must be at most {COMMENT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Comment service implementing [`CommentCommand`] and [`CommentQuery`].
#[derive(Clone)]
pub struct CommentService<C, P> {
    comments: Arc<C>,
    projects: Arc<P>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
}

impl<C, P> CommentService<C, P> {
    pub fn new(comments: Arc<C>, projects: Arc<P>, notifier: Notifier, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            projects,
            notifier,
            clock,
        }
    }
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository,
    P: ProjectRepository,
{
    async fn load(&self, comment_id: &CommentId) -> Result<ProjectComment, Error> {
        self.comments
            .find_by_id(comment_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| Error::not_found(format!("comment {comment_id} not found")))
    }

    async fn load_own(&self, requester: &UserId, comment_id: &CommentId) -> Result<ProjectComment, Error> {
        let comment = self.load(comment_id).await?;
        if comment.user_id() != requester {
            return Err(Error::forbidden("only the author may change this comment"));
        }
        if comment.is_deleted() {
            return Err(Error::conflict(format!("comment {comment_id} was deleted")));
        }
        Ok(comment)
    }

    async fn save(&self, comment: &ProjectComment) -> Result<(), Error> {
        self.comments.save(comment).await.map_err(store_error)
    }
}

#[async_trait]
impl<C, P> CommentCommand for CommentService<C, P>
where
    C: CommentRepository,
    P: ProjectRepository,
{
    async fn create_comment(
        &self,
        author: &UserId,
        project_id: &ProjectId,
        parent_id: Option<CommentId>,
        content: String,
    ) -> Result<ProjectComment, Error> {
        validate_content(&content)?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(|err| map_repository_error("project", err))?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))?;

        if let Some(parent_id) = parent_id {
            let parent = self.load(&parent_id).await?;
            if parent.project_id() != *project_id {
                return Err(Error::invalid_request(
                    "parent comment belongs to another project",
                ));
            }
            if parent.is_reply() {
                return Err(Error::invalid_request("replies cannot be nested"));
            }
        }

        let comment = ProjectComment::new(
            CommentId::random(),
            *project_id,
            parent_id,
            *author,
            content,
            self.clock.utc(),
        );
        self.save(&comment).await?;

        if !project.is_owned_by(author) {
            self.notifier
                .notify_best_effort(
                    NotificationType::CommentAdded,
                    *project.user_id(),
                    Some(*project_id),
                )
                .await;
        }
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
        content: String,
    ) -> Result<ProjectComment, Error> {
        validate_content(&content)?;
        let mut comment = self.load_own(requester, comment_id).await?;
        comment.edit(content);
        self.save(&comment).await?;
        Ok(comment)
    }

    async fn delete_comment(&self, requester: &UserId, comment_id: &CommentId) -> Result<(), Error> {
        let mut comment = self.load(comment_id).await?;
        if comment.user_id() != requester {
            return Err(Error::forbidden("only the author may delete this comment"));
        }
        if comment.is_deleted() {
            return Ok(());
        }
        comment.delete();
        self.save(&comment).await
    }

    async fn like_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
    ) -> Result<ProjectComment, Error> {
        let mut comment = self.load(comment_id).await?;
        comment.like(*requester);
        self.save(&comment).await?;
        Ok(comment)
    }

    async fn unlike_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
    ) -> Result<ProjectComment, Error> {
        let mut comment = self.load(comment_id).await?;
        comment.unlike(requester);
        self.save(&comment).await?;
        Ok(comment)
    }
}

#[async_trait]
impl<C, P> CommentQuery for CommentService<C, P>
where
    C: CommentRepository,
    P: ProjectRepository,
{
    async fn list_threads(&self, project_id: &ProjectId) -> Result<Vec<CommentThread>, Error> {
        self.comments
            .find_threads(project_id)
            .await
            .map_err(store_error)
    }
}
