//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::RepositoryError;

/// Port for reading and writing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user. Email or nickname collisions surface as
    /// [`RepositoryError::Duplicate`].
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    /// Find a user by id, including soft-deleted users.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Whether any user holds `nickname`.
    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, RepositoryError>;

    /// Atomically advance and return the sequence used to suffix generated
    /// nicknames built from `base`. The first call for a base returns 1.
    async fn next_nickname_sequence(&self, base: &str) -> Result<u64, RepositoryError>;
}
