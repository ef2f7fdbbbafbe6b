//! MongoDB-backed `UserRepository`.
//!
//! Generated-nickname suffixes come from a per-base counter document advanced
//! with `$inc`, so concurrent sign-ups never draw the same suffix.

use async_trait::async_trait;
use bson::doc;
use mongodb::Collection;
use mongodb::options::ReturnDocument;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{User, UserId};

use super::documents::{CounterDocument, UserDocument};
use super::error_mapping::map_mongo_error;
use super::mongo_helpers::{by_id, exists, find_one, upsert};
use super::store::{COUNTER_COLLECTION, MongoStore, USER_COLLECTION};

/// `UserRepository` over the `user` collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    users: Collection<UserDocument>,
    counters: Collection<CounterDocument>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            users: store.collection(USER_COLLECTION),
            counters: store.collection(COUNTER_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        upsert(&self.users, user.id(), &UserDocument::from(user)).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        find_one(&self.users, by_id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        find_one(&self.users, doc! { "email": email }).await
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, RepositoryError> {
        exists(&self.users, doc! { "nickname": nickname }).await
    }

    async fn next_nickname_sequence(&self, base: &str) -> Result<u64, RepositoryError> {
        let counter = self
            .counters
            .find_one_and_update(by_id(base), doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| RepositoryError::query(format!("counter `{base}` was not returned")))?;
        u64::try_from(counter.seq)
            .map_err(|_| RepositoryError::corrupt(format!("counter `{base}` is negative")))
    }
}
