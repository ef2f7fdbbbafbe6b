//! MongoDB-backed `TryoutRepository` and `MemberRepository`.
//!
//! A unique `(projectId, userId)` index on `projectTryout` enforces one
//! application per user and project even when two requests race past the
//! service check.

use async_trait::async_trait;
use bson::doc;
use mongodb::Collection;

use crate::domain::ports::{MemberRepository, RepositoryError, TryoutRepository};
use crate::domain::{ProjectId, ProjectMember, ProjectTryout, TryoutId, UserId};

use super::documents::{MemberDocument, TryoutDocument};
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{by_id, collect, exists, find_one, upsert};
use super::store::{MEMBER_COLLECTION, MongoStore, TRYOUT_COLLECTION};

/// `TryoutRepository` over the `projectTryout` collection.
#[derive(Clone)]
pub struct MongoTryoutRepository {
    tryouts: Collection<TryoutDocument>,
}

impl MongoTryoutRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            tryouts: store.collection(TRYOUT_COLLECTION),
        }
    }
}

#[async_trait]
impl TryoutRepository for MongoTryoutRepository {
    async fn save(&self, tryout: &ProjectTryout) -> Result<(), RepositoryError> {
        upsert(&self.tryouts, tryout.id(), &TryoutDocument::from(tryout)).await
    }

    async fn find_by_id(&self, id: &TryoutId) -> Result<Option<ProjectTryout>, RepositoryError> {
        find_one(&self.tryouts, by_id(id)).await
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectTryout>, RepositoryError> {
        let cursor = self
            .tryouts
            .find(doc! { "projectId": project_id.to_string() })
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn find_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<ProjectTryout>, RepositoryError> {
        let cursor = self
            .tryouts
            .find(doc! { "userId": applicant.to_string() })
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn exists_for(
        &self,
        project_id: &ProjectId,
        applicant: &UserId,
    ) -> Result<bool, RepositoryError> {
        exists(
            &self.tryouts,
            doc! { "projectId": project_id.to_string(), "userId": applicant.to_string() },
        )
        .await
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError> {
        self.tryouts
            .delete_many(doc! { "projectId": project_id.to_string() })
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }
}

/// `MemberRepository` over the `projectMember` collection.
#[derive(Clone)]
pub struct MongoMemberRepository {
    members: Collection<MemberDocument>,
}

impl MongoMemberRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            members: store.collection(MEMBER_COLLECTION),
        }
    }
}

#[async_trait]
impl MemberRepository for MongoMemberRepository {
    async fn save(&self, member: &ProjectMember) -> Result<(), RepositoryError> {
        upsert(&self.members, member.id(), &MemberDocument::from(member)).await
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, RepositoryError> {
        let cursor = self
            .members
            .find(doc! { "projectId": project_id.to_string() })
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError> {
        self.members
            .delete_many(doc! { "projectId": project_id.to_string() })
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }
}
