//! Port for issuing and validating bearer access tokens.

use chrono::{DateTime, Utc};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token is malformed, forged or names no valid user.
        Invalid { message: String } => "access token invalid: {message}",
        /// The token is well formed but past its expiry.
        Expired => "access token expired",
        /// The adapter could not sign a token.
        Signing { message: String } => "access token signing failed: {message}",
    }
}

/// A signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Port turning user ids into bearer tokens and back.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify `token` and return the user it was issued for.
    fn validate(&self, token: &str) -> Result<UserId, TokenError>;
}
