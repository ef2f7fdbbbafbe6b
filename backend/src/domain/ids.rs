//! Strongly typed entity identifiers.
//!
//! Every aggregate is keyed by a UUID that is stored and transmitted as its
//! canonical hyphenated string, so identifiers compare by string in the
//! document store (comment threads join on the string form).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The raw value was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The raw value was not a UUID.
    #[error("identifier must be a valid UUID")]
    Invalid,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, IdError> {
                let raw = raw.as_ref();
                if raw.is_empty() {
                    return Err(IdError::Empty);
                }
                if raw.trim() != raw {
                    return Err(IdError::Invalid);
                }
                Uuid::parse_str(raw).map(Self).map_err(|_| IdError::Invalid)
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::domain::User`].
    UserId
);
define_id!(
    /// Identifier of a [`crate::domain::Project`].
    ProjectId
);
define_id!(
    /// Identifier of a [`crate::domain::ProjectComment`].
    CommentId
);
define_id!(
    /// Identifier of a [`crate::domain::ProjectTryout`].
    TryoutId
);
define_id!(
    /// Identifier of a [`crate::domain::ProjectMember`].
    MemberId
);
define_id!(
    /// Identifier of a [`crate::domain::Resume`].
    ResumeId
);
define_id!(
    /// Identifier of a [`crate::domain::Notification`].
    NotificationId
);
define_id!(
    /// Identifier of a [`crate::domain::Job`].
    JobId
);
define_id!(
    /// Identifier of a [`crate::domain::TechStack`].
    TechStackId
);
