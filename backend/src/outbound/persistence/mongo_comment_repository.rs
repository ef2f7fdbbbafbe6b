//! MongoDB-backed `CommentRepository`.

use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::Collection;

use crate::domain::ports::{CommentRepository, RepositoryError};
use crate::domain::{CommentId, CommentThread, ProjectComment, ProjectId};

use super::comment_tree;
use super::documents::CommentDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{by_id, find_one, upsert};
use super::store::{COMMENT_COLLECTION, MongoStore};

/// `CommentRepository` over the `projectComment` collection.
#[derive(Clone)]
pub struct MongoCommentRepository {
    store: MongoStore,
    comments: Collection<CommentDocument>,
}

impl MongoCommentRepository {
    pub fn new(store: &MongoStore) -> Self {
        let comments = store.collection(COMMENT_COLLECTION);
        Self {
            store: store.clone(),
            comments,
        }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn save(&self, comment: &ProjectComment) -> Result<(), RepositoryError> {
        upsert(&self.comments, comment.id(), &CommentDocument::from(comment)).await
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<ProjectComment>, RepositoryError> {
        find_one(&self.comments, by_id(id)).await
    }

    async fn find_threads(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<CommentThread>, RepositoryError> {
        let cursor = self
            .store
            .raw_collection(COMMENT_COLLECTION)
            .aggregate(comment_tree::pipeline(project_id))
            .await
            .map_err(map_mongo_error)?;
        let raw: Vec<bson::Document> = cursor.try_collect().await.map_err(map_mongo_error)?;
        raw.into_iter().map(comment_tree::decode_thread).collect()
    }

    async fn delete_by_project(&self, project_id: &ProjectId) -> Result<(), RepositoryError> {
        self.comments
            .delete_many(doc! { "projectId": project_id.to_string() })
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }
}
