//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers, including the server-sent notification stream, live under
//! [`http`].

pub mod http;
