//! Shared helpers for MongoDB-backed integration tests.
//!
//! Every test gets its own throwaway database on the deployment named by
//! `PMEET_TEST_MONGODB_URI`. Without that variable the tests log a skip
//! marker and return early so `cargo test` stays green on machines without
//! MongoDB.

use chrono::{DateTime, Duration, TimeZone, Utc};
use mongodb::Client;
use pmeet::domain::{Project, ProjectDraft, ProjectId, Recruitment, UserId};
use pmeet::outbound::persistence::MongoStore;
use uuid::Uuid;

/// Environment variable naming the MongoDB deployment used by tests.
pub const MONGODB_URI_VAR: &str = "PMEET_TEST_MONGODB_URI";

/// A uniquely named database dropped by [`TestDatabase::drop_database`].
pub struct TestDatabase {
    client: Client,
    name: String,
    pub store: MongoStore,
}

impl TestDatabase {
    /// Connect and create indexes, or `None` when no deployment is configured.
    pub async fn connect() -> Option<Self> {
        let Ok(uri) = std::env::var(MONGODB_URI_VAR) else {
            eprintln!("SKIP-MONGODB: {MONGODB_URI_VAR} is not set");
            return None;
        };
        let client = Client::with_uri_str(&uri)
            .await
            .unwrap_or_else(|err| panic!("cannot connect to {MONGODB_URI_VAR}: {err}"));
        let name = format!("pmeet_it_{}", Uuid::new_v4().simple());
        let store = MongoStore::from_database(client.database(&name));
        store.ensure_indexes().await.expect("indexes are created");
        Some(Self {
            client,
            name,
            store,
        })
    }

    pub async fn drop_database(self) {
        self.client
            .database(&self.name)
            .drop()
            .await
            .expect("test database is dropped");
    }
}

/// Fixed instant all test timestamps are offset from.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid base time")
}

/// Project titled `title`, created `offset_secs` after [`base_time`].
pub fn project(owner: UserId, title: &str, offset_secs: i64) -> Project {
    let start = base_time() + Duration::days(7);
    let draft = ProjectDraft {
        title: title.to_owned(),
        start_date: start,
        end_date: start + Duration::days(60),
        thumbnail_url: None,
        tech_stacks: vec!["Rust".to_owned()],
        recruitments: vec![Recruitment {
            job_name: "Backend".to_owned(),
            number_of_recruitment: 2,
        }],
        description: "integration fixture".to_owned(),
    };
    Project::create(
        ProjectId::random(),
        owner,
        draft,
        base_time() + Duration::seconds(offset_secs),
    )
    .expect("valid fixture project")
}
