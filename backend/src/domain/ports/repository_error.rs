//! Error type shared by document-store repository ports.

use tracing::error;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { message: String } => "repository rejected duplicate: {message}",
        /// A stored record could not be decoded into a domain value.
        Corrupt { message: String } => "repository returned corrupt record: {message}",
    }
}

/// Map a repository failure onto the domain error taxonomy.
///
/// `resource` names what was being accessed and prefixes the message.
pub fn map_repository_error(resource: &str, err: RepositoryError) -> Error {
    match err {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{resource} store unavailable: {message}"))
        }
        RepositoryError::Duplicate { message } => {
            Error::conflict(format!("{resource} already exists: {message}"))
        }
        RepositoryError::Query { message } | RepositoryError::Corrupt { message } => {
            error!(resource, %message, "repository failure");
            Error::internal(format!("{resource} store error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(RepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::duplicate("name"), ErrorCode::Conflict)]
    #[case(RepositoryError::query("bad pipeline"), ErrorCode::InternalError)]
    #[case(RepositoryError::corrupt("bad id"), ErrorCode::InternalError)]
    fn maps_to_domain_codes(#[case] err: RepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_repository_error("project", err).code(), code);
    }

    #[rstest]
    fn message_names_the_resource() {
        let err = map_repository_error("job", RepositoryError::duplicate("Backend"));
        assert_eq!(err.message(), "job already exists: Backend");
    }
}
