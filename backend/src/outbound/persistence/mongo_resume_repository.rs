//! MongoDB-backed `ResumeRepository`.
//!
//! Resume searches only see active resumes of other users, and keyword
//! matches ignore letter case.

use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::Collection;
use pagination::PageRequest;

use crate::domain::ports::{RepositoryError, ResumeRepository, ResumeSearch};
use crate::domain::{Resume, ResumeId, UserId};

use super::criteria::{self, CaseSensitivity};
use super::documents::ResumeDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{aggregate, by_id, collect, find_one, upsert};
use super::slice_pipeline::{self, SortSpec};
use super::store::{MongoStore, RESUME_COLLECTION};

/// `ResumeRepository` over the `resume` collection.
#[derive(Clone)]
pub struct MongoResumeRepository {
    store: MongoStore,
    resumes: Collection<ResumeDocument>,
}

impl MongoResumeRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            store: store.clone(),
            resumes: store.collection(RESUME_COLLECTION),
        }
    }
}

fn search_pipeline(search: &ResumeSearch, page: PageRequest) -> Vec<Document> {
    let base = doc! {
        "isActive": true,
        "userId": { "$ne": search.requester.to_string() }
    };
    let predicate = criteria::build(base, &search.filter, CaseSensitivity::Insensitive);
    let sort = SortSpec::by(search.sort.key.as_str(), search.sort.direction);
    slice_pipeline::build(predicate, Vec::new(), &sort, page)
}

#[async_trait]
impl ResumeRepository for MongoResumeRepository {
    async fn save(&self, resume: &Resume) -> Result<(), RepositoryError> {
        upsert(&self.resumes, resume.id(), &ResumeDocument::from(resume)).await
    }

    async fn find_by_id(&self, id: &ResumeId) -> Result<Option<Resume>, RepositoryError> {
        find_one(&self.resumes, by_id(id)).await
    }

    async fn find_by_ids(&self, ids: &[ResumeId]) -> Result<Vec<Resume>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let cursor = self
            .resumes
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn delete(&self, id: &ResumeId) -> Result<(), RepositoryError> {
        self.resumes
            .delete_one(by_id(id))
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Resume>, RepositoryError> {
        let cursor = self
            .resumes
            .find(doc! { "userId": owner.to_string() })
            .sort(doc! { "updatedAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?;
        collect(cursor).await
    }

    async fn search(
        &self,
        search: &ResumeSearch,
        page: PageRequest,
    ) -> Result<Vec<Resume>, RepositoryError> {
        aggregate::<ResumeDocument, Resume>(
            &self.store.raw_collection(RESUME_COLLECTION),
            search_pipeline(search, page),
        )
        .await
    }
}
