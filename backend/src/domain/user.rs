//! User accounts and their resume bookmarks.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ResumeId, UserId};

/// Validation errors for user-editable fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Nickname was blank.
    #[error("nickname must not be empty")]
    EmptyNickname,
    /// Nickname shorter than [`NICKNAME_MIN`].
    #[error("nickname must be at least {min} characters")]
    NicknameTooShort {
        /// Minimum length.
        min: usize,
    },
    /// Nickname longer than [`NICKNAME_MAX`].
    #[error("nickname must be at most {max} characters")]
    NicknameTooLong {
        /// Maximum length.
        max: usize,
    },
    /// Nickname contains characters outside letters, digits and underscores.
    #[error("nickname may only contain letters, numbers, or underscores")]
    NicknameInvalidCharacters,
}

/// Minimum nickname length in characters.
pub const NICKNAME_MIN: usize = 2;
/// Maximum nickname length in characters.
pub const NICKNAME_MAX: usize = 20;

static NICKNAME_RE: OnceLock<Regex> = OnceLock::new();

fn nickname_regex() -> &'static Regex {
    NICKNAME_RE.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N}_]+$")
            .unwrap_or_else(|error| panic!("nickname regex failed to compile: {error}"))
    })
}

/// Public, unique handle of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    /// Validate and construct a [`Nickname`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyNickname);
        }
        let length = raw.chars().count();
        if length < NICKNAME_MIN {
            return Err(UserValidationError::NicknameTooShort { min: NICKNAME_MIN });
        }
        if length > NICKNAME_MAX {
            return Err(UserValidationError::NicknameTooLong { max: NICKNAME_MAX });
        }
        if !nickname_regex().is_match(&raw) {
            return Err(UserValidationError::NicknameInvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Build a generated nickname from a base and a sequence number, trimming
    /// the base so the result stays within [`NICKNAME_MAX`].
    ///
    /// # Examples
    /// ```
    /// use pmeet::domain::Nickname;
    ///
    /// let nickname = Nickname::generated("user", 7).expect("valid nickname");
    /// assert_eq!(nickname.as_ref(), "user7");
    /// ```
    pub fn generated(base: &str, sequence: u64) -> Result<Self, UserValidationError> {
        let suffix = sequence.to_string();
        let room = NICKNAME_MAX.saturating_sub(suffix.chars().count());
        let cleaned: String = base
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .take(room)
            .collect();
        let stem = if cleaned.is_empty() {
            "user".to_owned()
        } else {
            cleaned
        };
        Self::new(format!("{stem}{suffix}"))
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user's bookmark on someone else's resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeBookmark {
    pub resume_id: ResumeId,
    pub added_at: DateTime<Utc>,
}

/// Optional profile fields a user can edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
}

/// Application user.
///
/// ## Invariants
/// - `email` and `nickname` are unique across users.
/// - At most one bookmark per resume; re-bookmarking refreshes `added_at`.
/// - Deleted users keep their record but cannot sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(crate) id: UserId,
    pub(crate) provider: Option<String>,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) nickname: Nickname,
    pub(crate) profile: UserProfile,
    pub(crate) resume_bookmarks: Vec<ResumeBookmark>,
    pub(crate) is_deleted: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    /// Register a user signing in through an OAuth provider.
    pub fn register(
        id: UserId,
        provider: Option<String>,
        email: String,
        name: String,
        nickname: Nickname,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            provider,
            email,
            name,
            nickname,
            profile: UserProfile::default(),
            resume_bookmarks: Vec::new(),
            is_deleted: false,
            created_at: now,
        }
    }

    /// Replace the nickname and profile fields.
    pub fn update_profile(&mut self, nickname: Nickname, profile: UserProfile) {
        self.nickname = nickname;
        self.profile = profile;
    }

    /// Bookmark a resume, refreshing the timestamp of an existing entry.
    pub fn add_resume_bookmark(&mut self, resume_id: ResumeId, now: DateTime<Utc>) {
        let fresh = ResumeBookmark {
            resume_id,
            added_at: now,
        };
        match self
            .resume_bookmarks
            .iter_mut()
            .find(|b| b.resume_id == resume_id)
        {
            Some(existing) => *existing = fresh,
            None => self.resume_bookmarks.push(fresh),
        }
    }

    /// Remove the bookmark on `resume_id`, if any.
    pub fn delete_resume_bookmark(&mut self, resume_id: &ResumeId) {
        self.resume_bookmarks.retain(|b| b.resume_id != *resume_id);
    }

    /// Whether the user bookmarked `resume_id`.
    pub fn has_bookmarked(&self, resume_id: &ResumeId) -> bool {
        self.resume_bookmarks
            .iter()
            .any(|b| b.resume_id == *resume_id)
    }

    /// Soft delete: flag only, data is retained.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// User identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// OAuth provider the account signed up with.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Unique email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name reported by the provider.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique public nickname.
    pub fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    /// Editable profile fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Bookmarked resumes in insertion order.
    pub fn resume_bookmarks(&self) -> &[ResumeBookmark] {
        &self.resume_bookmarks
    }

    /// Whether the account was soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests;
