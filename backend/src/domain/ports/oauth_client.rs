//! Port for exchanging OAuth authorisation codes for user profiles.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by OAuth adapters.
    pub enum OAuthClientError {
        /// No provider is configured under this name.
        UnknownProvider { provider: String } => "oauth provider `{provider}` is not configured",
        /// The provider refused the code or returned an unusable profile.
        Rejected { message: String } => "oauth provider rejected the request: {message}",
        /// The provider could not be reached.
        Transport { message: String } => "oauth provider unreachable: {message}",
    }
}

/// Identity returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    pub provider: String,
    pub email: String,
    pub name: String,
}

/// Port over the provider round trips of the authorisation-code flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Exchange `code` for an access token at `provider` and read the
    /// signed-in user's profile.
    async fn fetch_profile(
        &self,
        provider: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OAuthProfile, OAuthClientError>;
}
