//! MongoDB persistence adapters.
//!
//! Concrete implementations of the domain repository ports backed by the
//! official `mongodb` driver.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between stored documents
//!   (`documents.rs`) and domain aggregates. No business rules live here.
//! - **Pipelines as data**: keyword criteria, slice pagination and comment
//!   thread assembly are built as plain BSON stage lists so they can be
//!   unit-tested without a server.
//! - **Strongly typed errors**: driver and decoding failures map onto
//!   [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! # Example
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use pmeet::outbound::persistence::{MongoProjectRepository, MongoStore, StoreConfig};
//!
//! let store = MongoStore::connect(&StoreConfig::new("mongodb://localhost", "pmeet")).await?;
//! store.ensure_indexes().await?;
//! let projects = MongoProjectRepository::new(&store);
//! # let _ = projects;
//! # Ok(())
//! # }
//! ```

mod comment_tree;
mod criteria;
mod documents;
mod error_mapping;
mod mongo_catalog_repository;
mod mongo_comment_repository;
mod mongo_helpers;
mod mongo_notification_repository;
mod mongo_project_repository;
mod mongo_resume_repository;
mod mongo_tryout_repository;
mod mongo_user_repository;
mod slice_pipeline;
mod store;

pub use mongo_catalog_repository::{MongoJobRepository, MongoTechStackRepository};
pub use mongo_comment_repository::MongoCommentRepository;
pub use mongo_notification_repository::MongoNotificationRepository;
pub use mongo_project_repository::MongoProjectRepository;
pub use mongo_resume_repository::MongoResumeRepository;
pub use mongo_tryout_repository::{MongoMemberRepository, MongoTryoutRepository};
pub use mongo_user_repository::MongoUserRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
