//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed repositories and aggregation pipelines
//! - **auth**: HS256 bearer tokens
//! - **oauth**: provider code exchange and profile lookup over HTTP
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod oauth;
pub mod persistence;
