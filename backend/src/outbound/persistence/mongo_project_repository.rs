//! MongoDB-backed `ProjectRepository`.
//!
//! Searches run as a slice pipeline over the `project` collection. Keyword
//! matches are case-sensitive substrings; the bookmark-count ordering sorts on
//! a field computed from the embedded bookmark array.

use async_trait::async_trait;
use bson::{DateTime as BsonDateTime, Document, doc};
use chrono::{DateTime, Utc};
use mongodb::Collection;
use pagination::PageRequest;

use crate::domain::ports::{ProjectRepository, ProjectSearch, RepositoryError};
use crate::domain::{Project, ProjectBookmark, ProjectId, ProjectSortKey, UserId};

use super::criteria::{self, CaseSensitivity};
use super::documents::ProjectDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{aggregate, by_id, collect, find_one, upsert};
use super::slice_pipeline::{self, SortSpec, array_size};
use super::store::{MongoStore, PROJECT_COLLECTION};

/// `ProjectRepository` over the `project` collection.
#[derive(Clone)]
pub struct MongoProjectRepository {
    store: MongoStore,
    projects: Collection<ProjectDocument>,
}

impl MongoProjectRepository {
    pub fn new(store: &MongoStore) -> Self {
        let projects = store.collection(PROJECT_COLLECTION);
        Self {
            store: store.clone(),
            projects,
        }
    }
}

fn search_pipeline(search: &ProjectSearch, page: PageRequest) -> Vec<bson::Document> {
    let base = doc! { "isCompleted": search.is_completed };
    let predicate = criteria::build(base, &search.filter, CaseSensitivity::Sensitive);
    let computed = match search.sort.key {
        ProjectSortKey::BookmarkCount => vec![("bookmarkCount", array_size("bookmarks"))],
        _ => Vec::new(),
    };
    let sort = SortSpec::by(search.sort.key.as_str(), search.sort.direction);
    slice_pipeline::build(predicate, computed, &sort, page)
}

/// Update pipeline refreshing the holder's entry in place, or appending one.
fn put_bookmark_update(bookmark: &ProjectBookmark) -> Vec<Document> {
    let user_id = bookmark.user_id.to_string();
    let added_at = BsonDateTime::from_chrono(bookmark.added_at);
    vec![doc! { "$set": {
        "bookmarks": { "$cond": [
            { "$in": [user_id.as_str(), { "$ifNull": ["$bookmarks.userId", []] }] },
            { "$map": {
                "input": "$bookmarks",
                "as": "b",
                "in": { "$cond": [
                    { "$eq": ["$$b.userId", user_id.as_str()] },
                    { "$mergeObjects": ["$$b", { "addedAt": added_at }] },
                    "$$b"
                ] }
            } },
            { "$concatArrays": [
                { "$ifNull": ["$bookmarks", []] },
                [{ "userId": user_id.as_str(), "addedAt": added_at }]
            ] }
        ] },
        "updatedAt": added_at
    } }]
}

fn remove_bookmark_update(user_id: &UserId, now: DateTime<Utc>) -> Document {
    doc! {
        "$pull": { "bookmarks": { "userId": user_id.to_string() } },
        "$set": { "updatedAt": BsonDateTime::from_chrono(now) }
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn save(&self, project: &Project) -> Result<(), RepositoryError> {
        upsert(&self.projects, project.id(), &ProjectDocument::from(project)).await
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        find_one(&self.projects, by_id(id)).await
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        self.projects
            .delete_one(by_id(id))
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }

    async fn search(
        &self,
        search: &ProjectSearch,
        page: PageRequest,
    ) -> Result<Vec<Project>, RepositoryError> {
        aggregate::<ProjectDocument, Project>(
            &self.store.raw_collection(PROJECT_COLLECTION),
            search_pipeline(search, page),
        )
        .await
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, RepositoryError> {
        let cursor = self
            .projects
            .find(doc! { "userId": owner.to_string() })
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn find_bookmarked_by(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Project>, RepositoryError> {
        let cursor = self
            .projects
            .find(doc! { "bookmarks.userId": user_id.to_string() })
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn put_bookmark(
        &self,
        id: &ProjectId,
        bookmark: &ProjectBookmark,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .projects
            .update_one(by_id(id), put_bookmark_update(bookmark))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count > 0)
    }

    async fn remove_bookmark(
        &self,
        id: &ProjectId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .projects
            .update_one(by_id(id), remove_bookmark_update(user_id, now))
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count > 0)
    }
}
