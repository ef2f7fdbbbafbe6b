//! Ports for the job and tech-stack dictionaries.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Job, TechStack};

use super::RepositoryError;

/// Port for the job dictionary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job. Name collisions surface as [`RepositoryError::Duplicate`].
    async fn insert(&self, job: &Job) -> Result<(), RepositoryError>;

    /// Whether a job named exactly `name` exists.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Case-insensitive substring search ordered by name length, then name.
    /// Returns at most `page.peek_limit()` jobs.
    async fn search_by_name(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<Job>, RepositoryError>;
}

/// Port for the tech-stack dictionary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TechStackRepository: Send + Sync {
    /// Insert a tech stack. Name collisions surface as
    /// [`RepositoryError::Duplicate`].
    async fn insert(&self, tech_stack: &TechStack) -> Result<(), RepositoryError>;

    /// Whether a tech stack named exactly `name` exists.
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    /// Case-insensitive substring search ordered by name length, then name.
    /// Returns at most `page.peek_limit()` entries.
    async fn search_by_name(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Vec<TechStack>, RepositoryError>;
}
