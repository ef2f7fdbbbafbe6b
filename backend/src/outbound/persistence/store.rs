//! MongoDB client handle, collection names and index bootstrap.
//!
//! # Design
//!
//! - One driver [`Client`] is shared by every repository; the driver pools
//!   connections internally.
//! - Unique indexes back the uniqueness rules the services pre-check, so a
//!   lost race still surfaces as a duplicate-key error.

use std::time::Duration;

use bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

pub(crate) const PROJECT_COLLECTION: &str = "project";
pub(crate) const COMMENT_COLLECTION: &str = "projectComment";
pub(crate) const TRYOUT_COLLECTION: &str = "projectTryout";
pub(crate) const MEMBER_COLLECTION: &str = "projectMember";
pub(crate) const RESUME_COLLECTION: &str = "resume";
pub(crate) const USER_COLLECTION: &str = "user";
pub(crate) const JOB_COLLECTION: &str = "job";
pub(crate) const TECH_STACK_COLLECTION: &str = "techStack";
pub(crate) const NOTIFICATION_COLLECTION: &str = "notification";
pub(crate) const COUNTER_COLLECTION: &str = "nicknameCounter";

/// Errors raised while opening the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid mongodb connection settings: {message}")]
    Options { message: String },

    /// The deployment did not answer or rejected a bootstrap command.
    #[error("mongodb bootstrap failed: {message}")]
    Bootstrap { message: String },
}

impl StoreError {
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    pub fn bootstrap(message: impl Into<String>) -> Self {
        Self::Bootstrap {
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pmeet::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "pmeet")
///     .with_max_pool_size(20)
///     .with_server_selection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database(), "pmeet");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    max_pool_size: u32,
    server_selection_timeout: Duration,
}

impl StoreConfig {
    /// Defaults: 10 pooled connections and a 10 second selection timeout.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(10),
        }
    }

    /// Cap the driver's connection pool.
    pub fn with_max_pool_size(mut self, max_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Bound how long the driver waits for a usable server.
    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database holding every collection.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Shared handle to the application database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parse the settings and build a client.
    ///
    /// The driver connects lazily; call [`MongoStore::ping`] to verify the
    /// deployment is reachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| StoreError::options(err.to_string()))?;
        options.max_pool_size = Some(config.max_pool_size);
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.app_name = Some("pmeet".to_owned());

        let client =
            Client::with_options(options).map_err(|err| StoreError::options(err.to_string()))?;
        Ok(Self {
            database: client.database(config.database()),
        })
    }

    /// Wrap an existing database handle.
    pub fn from_database(database: Database) -> Self {
        Self { database }
    }

    pub(crate) fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Serialize + DeserializeOwned,
    {
        self.database.collection(name)
    }

    /// Untyped collection handle for aggregation results.
    pub(crate) fn raw_collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Round-trip a `ping` command.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::bootstrap(err.to_string()))
    }

    /// Create the indexes every repository relies on.
    ///
    /// Index creation is idempotent, so this runs on every start-up.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for (collection, keys, unique) in index_plan() {
            let options = IndexOptions::builder().unique(unique).build();
            let model = IndexModel::builder().keys(keys).options(options).build();
            self.raw_collection(collection)
                .create_index(model)
                .await
                .map_err(|err| StoreError::bootstrap(format!("{collection}: {err}")))?;
        }
        info!(database = %self.database.name(), "mongodb indexes ensured");
        Ok(())
    }
}

fn index_plan() -> Vec<(&'static str, Document, bool)> {
    vec![
        (USER_COLLECTION, doc! { "email": 1 }, true),
        (USER_COLLECTION, doc! { "nickname": 1 }, true),
        (JOB_COLLECTION, doc! { "name": 1 }, true),
        (TECH_STACK_COLLECTION, doc! { "name": 1 }, true),
        (TRYOUT_COLLECTION, doc! { "projectId": 1, "userId": 1 }, true),
        (COMMENT_COLLECTION, doc! { "projectId": 1, "parentId": 1 }, false),
        (MEMBER_COLLECTION, doc! { "projectId": 1 }, false),
        (RESUME_COLLECTION, doc! { "userId": 1 }, false),
        (NOTIFICATION_COLLECTION, doc! { "targetUserId": 1, "createdAt": -1 }, false),
        (PROJECT_COLLECTION, doc! { "isCompleted": 1, "createdAt": -1 }, false),
    ]
}
