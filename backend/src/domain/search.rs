//! Search vocabulary shared by listing operations.
//!
//! Filter types pick which fields a keyword is matched against; sort keys name
//! the ordering field. Adapters translate both into store predicates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::SortDirection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raised when a query parameter names an unknown enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire representation used in query strings.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(UnknownVariant::new($kind, s))
            }
        }
    };
}

keyword_enum! {
    /// Fields a project keyword search may target.
    ProjectFilterType ("project filter type") {
        /// Title, recruited job names and tech stacks.
        All => "ALL",
        /// Project title only.
        Title => "TITLE",
        /// Recruited job names only.
        JobName => "JOB_NAME",
        /// Tech stack names only.
        TechStack => "TECH_STACK",
    }
}

keyword_enum! {
    /// Fields a resume keyword search may target.
    ResumeFilterType ("resume filter type") {
        /// Title, desired jobs and owner nickname.
        All => "ALL",
        /// Resume title only.
        Title => "TITLE",
        /// Desired job names only.
        JobName => "JOB_NAME",
        /// Owner nickname only.
        Nickname => "NICKNAME",
    }
}

keyword_enum! {
    /// Ordering keys accepted by project search.
    ProjectSortKey ("project sort key") {
        /// Creation timestamp.
        CreatedAt => "createdAt",
        /// Title, lexicographic.
        Title => "title",
        /// Project start date.
        StartDate => "startDate",
        /// Number of bookmarks, computed per query.
        BookmarkCount => "bookmarkCount",
    }
}

keyword_enum! {
    /// Ordering keys accepted by resume search.
    ResumeSortKey ("resume sort key") {
        /// Last update timestamp.
        UpdatedAt => "updatedAt",
        /// Creation timestamp.
        CreatedAt => "createdAt",
        /// Title, lexicographic.
        Title => "title",
    }
}

/// Keyword filter: which fields to match and the literal substring.
///
/// A missing type or blank keyword matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFilter<T> {
    /// Selected filter type.
    pub filter_type: Option<T>,
    /// Literal substring to look for.
    pub keyword: Option<String>,
}

impl<T> Default for KeywordFilter<T> {
    fn default() -> Self {
        Self {
            filter_type: None,
            keyword: None,
        }
    }
}

impl<T: Copy> KeywordFilter<T> {
    /// Build a filter from optional parts.
    pub const fn new(filter_type: Option<T>, keyword: Option<String>) -> Self {
        Self {
            filter_type,
            keyword,
        }
    }

    /// The active `(type, keyword)` pair, or `None` when the filter matches
    /// everything.
    pub fn active(&self) -> Option<(T, &str)> {
        let filter_type = self.filter_type?;
        let keyword = self.keyword.as_deref()?;
        if keyword.is_empty() {
            None
        } else {
            Some((filter_type, keyword))
        }
    }
}

/// Requested ordering: key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<K> {
    /// Field to order by.
    pub key: K,
    /// Ascending or descending.
    pub direction: SortDirection,
}

impl<K> SortOrder<K> {
    /// Pair a key with a direction.
    pub const fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

impl Default for SortOrder<ProjectSortKey> {
    fn default() -> Self {
        Self::new(ProjectSortKey::CreatedAt, SortDirection::Desc)
    }
}

impl Default for SortOrder<ResumeSortKey> {
    fn default() -> Self {
        Self::new(ResumeSortKey::UpdatedAt, SortDirection::Desc)
    }
}

/// Something spanning a start and an optional end instant.
pub trait DateRange {
    /// Inclusive start.
    fn start(&self) -> DateTime<Utc>;
    /// End, when known.
    fn end(&self) -> Option<DateTime<Utc>>;
}

/// Raised when a range ends before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("end date must be after start date")]
pub struct DateRangeError;

/// Check that a range's end lies strictly after its start.
///
/// Open-ended ranges always pass.
pub fn ensure_ordered(range: &impl DateRange) -> Result<(), DateRangeError> {
    match range.end() {
        Some(end) if end <= range.start() => Err(DateRangeError),
        _ => Ok(()),
    }
}
