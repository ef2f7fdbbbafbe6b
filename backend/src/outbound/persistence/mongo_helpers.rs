//! Helpers shared by the MongoDB repository adapters.

use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::{Collection, Cursor};
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::ports::RepositoryError;

use super::error_mapping::{map_decode_error, map_mongo_error};

/// Filter selecting one document by its string `_id`.
pub(crate) fn by_id(id: impl ToString) -> Document {
    doc! { "_id": id.to_string() }
}

/// Insert or replace the document stored under `id`.
pub(crate) async fn upsert<D>(
    collection: &Collection<D>,
    id: impl ToString,
    document: &D,
) -> Result<(), RepositoryError>
where
    D: Serialize + Send + Sync,
{
    collection
        .replace_one(by_id(id), document)
        .upsert(true)
        .await
        .map(|_| ())
        .map_err(map_mongo_error)
}

/// Find one stored document and convert it to its domain aggregate.
pub(crate) async fn find_one<D, T>(
    collection: &Collection<D>,
    filter: Document,
) -> Result<Option<T>, RepositoryError>
where
    D: DeserializeOwned + Send + Sync,
    T: TryFrom<D, Error = RepositoryError>,
{
    collection
        .find_one(filter)
        .await
        .map_err(map_mongo_error)?
        .map(T::try_from)
        .transpose()
}

/// Drain a typed cursor, converting every document.
pub(crate) async fn collect<D, T>(cursor: Cursor<D>) -> Result<Vec<T>, RepositoryError>
where
    D: DeserializeOwned + Send + Sync + Unpin,
    T: TryFrom<D, Error = RepositoryError>,
{
    let stored: Vec<D> = cursor.try_collect().await.map_err(map_mongo_error)?;
    stored.into_iter().map(T::try_from).collect()
}

/// Run an aggregation and decode every result through `D`.
///
/// Stages may add computed fields; decoding ignores fields `D` does not
/// declare.
pub(crate) async fn aggregate<D, T>(
    collection: &Collection<Document>,
    pipeline: Vec<Document>,
) -> Result<Vec<T>, RepositoryError>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = RepositoryError>,
{
    let cursor = collection.aggregate(pipeline).await.map_err(map_mongo_error)?;
    let raw: Vec<Document> = cursor.try_collect().await.map_err(map_mongo_error)?;
    raw.into_iter()
        .map(|document| {
            let stored: D = bson::from_document(document).map_err(map_decode_error)?;
            T::try_from(stored)
        })
        .collect()
}

/// Whether any document matches `filter`.
pub(crate) async fn exists<D>(
    collection: &Collection<D>,
    filter: Document,
) -> Result<bool, RepositoryError>
where
    D: Send + Sync,
{
    collection
        .count_documents(filter)
        .limit(1)
        .await
        .map(|count| count > 0)
        .map_err(map_mongo_error)
}
