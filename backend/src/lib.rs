//! pmeet backend library: domain model, inbound HTTP adapter, MongoDB and
//! OAuth/JWT outbound adapters, and the OpenAPI description.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
