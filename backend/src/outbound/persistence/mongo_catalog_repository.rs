//! MongoDB-backed job and tech-stack dictionaries.
//!
//! Both dictionaries share one document shape and one search: a
//! case-insensitive substring match on `name`, shortest names first so exact
//! hits surface at the top.

use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::Collection;
use pagination::{PageRequest, SortDirection};

use crate::domain::ports::{JobRepository, RepositoryError, TechStackRepository};
use crate::domain::{Job, TechStack};

use super::criteria::{self, CaseSensitivity};
use super::documents::NamedDocument;
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{aggregate, exists};
use super::slice_pipeline::{self, SortSpec, string_length};
use super::store::{JOB_COLLECTION, MongoStore, TECH_STACK_COLLECTION};

const NAME_LENGTH_FIELD: &str = "nameLength";

fn search_pipeline(keyword: Option<&str>, page: PageRequest) -> Vec<Document> {
    let by_name = keyword
        .and_then(|kw| criteria::keyword_predicate(&["name"], kw, CaseSensitivity::Insensitive));
    let predicate = criteria::combine(Document::new(), by_name);
    let sort = SortSpec::by(NAME_LENGTH_FIELD, SortDirection::Asc).then("name", SortDirection::Asc);
    slice_pipeline::build(
        predicate,
        vec![(NAME_LENGTH_FIELD, string_length("name"))],
        &sort,
        page,
    )
}

/// A dictionary collection of named entries.
#[derive(Clone)]
struct NamedCollection {
    store: MongoStore,
    name: &'static str,
    entries: Collection<NamedDocument>,
}

impl NamedCollection {
    fn new(store: &MongoStore, name: &'static str) -> Self {
        Self {
            store: store.clone(),
            name,
            entries: store.collection(name),
        }
    }

    async fn insert(&self, entry: NamedDocument) -> Result<(), RepositoryError> {
        self.entries
            .insert_one(entry)
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        exists(&self.entries, doc! { "name": name }).await
    }

    async fn search<T>(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<T>, RepositoryError>
    where
        T: TryFrom<NamedDocument, Error = RepositoryError>,
    {
        aggregate::<NamedDocument, T>(
            &self.store.raw_collection(self.name),
            search_pipeline(keyword.as_deref(), page),
        )
        .await
    }
}

/// `JobRepository` over the `job` collection.
#[derive(Clone)]
pub struct MongoJobRepository(NamedCollection);

impl MongoJobRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self(NamedCollection::new(store, JOB_COLLECTION))
    }
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), RepositoryError> {
        self.0.insert(NamedDocument::from(job)).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        self.0.exists_by_name(name).await
    }

    async fn search_by_name(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<Job>, RepositoryError> {
        self.0.search(keyword, page).await
    }
}

/// `TechStackRepository` over the `techStack` collection.
#[derive(Clone)]
pub struct MongoTechStackRepository(NamedCollection);

impl MongoTechStackRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self(NamedCollection::new(store, TECH_STACK_COLLECTION))
    }
}

#[async_trait]
impl TechStackRepository for MongoTechStackRepository {
    async fn insert(&self, tech_stack: &TechStack) -> Result<(), RepositoryError> {
        self.0.insert(NamedDocument::from(tech_stack)).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        self.0.exists_by_name(name).await
    }

    async fn search_by_name(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<TechStack>, RepositoryError> {
        self.0.search(keyword, page).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn shortest_names_sort_first() {
        let pipeline = search_pipeline(Some("java"), PageRequest::new(0, 20).expect("valid page"));
        assert_eq!(
            pipeline[0],
            doc! { "$match": { "name": { "$regex": "java", "$options": "i" } } }
        );
        assert_eq!(
            pipeline[2],
            doc! { "$sort": { "nameLength": 1, "name": 1, "_id": 1 } }
        );
    }

    #[rstest]
    fn missing_keyword_lists_everything() {
        let pipeline = search_pipeline(None, PageRequest::new(0, 20).expect("valid page"));
        assert_eq!(pipeline[0], doc! { "$match": {} });
    }
}
