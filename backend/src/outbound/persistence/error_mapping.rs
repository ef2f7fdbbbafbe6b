//! Shared MongoDB error mapping for repository adapters.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

use crate::domain::ports::RepositoryError;

/// Server error code raised when a unique index rejects a write.
pub(crate) const DUPLICATE_KEY_CODE: i32 = 11000;

/// Map a driver error onto [`RepositoryError`].
///
/// Unique-index violations become `Duplicate` and selection or I/O failures
/// become `Connection`. Undecodable documents are `Corrupt`; anything else is
/// a `Query` failure.
pub(crate) fn map_mongo_error(error: MongoError) -> RepositoryError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE => {
            RepositoryError::duplicate(write.message.clone())
        }
        ErrorKind::Command(command) if command.code == DUPLICATE_KEY_CODE => {
            RepositoryError::duplicate(command.message.clone())
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => RepositoryError::connection(error.to_string()),
        ErrorKind::BsonDeserialization(_) => RepositoryError::corrupt(error.to_string()),
        _ => RepositoryError::query(error.to_string()),
    }
}

/// Map a BSON decoding failure for a stored record.
pub(crate) fn map_decode_error(error: impl std::fmt::Display) -> RepositoryError {
    debug!(error = %error, "stored document could not be decoded");
    RepositoryError::corrupt(error.to_string())
}

/// Map a BSON encoding failure for an outgoing record.
pub(crate) fn map_encode_error(error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::query(format!("document encoding failed: {error}"))
}
