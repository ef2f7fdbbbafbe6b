//! Driving ports for user accounts and sign-in.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfile};

use super::AccessToken;

/// Result of an OAuth sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub access_token: AccessToken,
    /// True when the sign-in created the account.
    pub is_new_user: bool,
}

/// Driving port for signing in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Complete the authorisation-code flow with `provider` and sign the user
    /// in, registering them on first sight.
    async fn login_with_oauth(
        &self,
        provider: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<LoginOutcome, Error>;
}

/// Driving port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Replace the requester's nickname and profile fields.
    async fn update_profile(
        &self,
        requester: &UserId,
        nickname: String,
        profile: UserProfile,
    ) -> Result<User, Error>;

    /// Soft-delete the requester's account.
    async fn delete_account(&self, requester: &UserId) -> Result<(), Error>;
}

/// Driving port for account reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a live user.
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error>;

    /// Whether `nickname` is valid and unused.
    async fn is_nickname_available(&self, nickname: &str) -> Result<bool, Error>;
}
