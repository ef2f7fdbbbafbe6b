//! Driving ports for the job and tech-stack dictionaries.

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::{Error, Job, TechStack};

/// Driving port for dictionary writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Add a job; duplicate names conflict.
    async fn create_job(&self, name: String) -> Result<Job, Error>;

    /// Add a tech stack; duplicate names conflict.
    async fn create_tech_stack(&self, name: String) -> Result<TechStack, Error>;
}

/// Driving port for dictionary lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Jobs whose name contains `keyword`, shortest name first.
    async fn search_jobs(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Slice<Job>, Error>;

    /// Tech stacks whose name contains `keyword`, shortest name first.
    async fn search_tech_stacks(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Slice<TechStack>, Error>;
}
