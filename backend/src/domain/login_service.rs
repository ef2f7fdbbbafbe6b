//! OAuth sign-in.
//!
//! Exchanges an authorisation code for the provider profile, then signs in
//! the matching user or registers a new one with a generated nickname.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    LoginOutcome, LoginService, OAuthClient, OAuthClientError, TokenError, TokenService,
    UserRepository, map_repository_error,
};
use crate::domain::{Error, Nickname, User, UserId};

fn map_oauth_error(err: OAuthClientError) -> Error {
    match err {
        OAuthClientError::UnknownProvider { .. } => Error::invalid_request(err.to_string()),
        OAuthClientError::Rejected { .. } => Error::unauthorized(err.to_string()),
        OAuthClientError::Transport { .. } => Error::service_unavailable(err.to_string()),
    }
}

fn map_token_error(err: TokenError) -> Error {
    Error::internal(err.to_string())
}

/// Nickname stem taken from the local part of an email address.
fn nickname_base(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// [`LoginService`] backed by an OAuth client and the user store.
#[derive(Clone)]
pub struct OAuthLoginService<U> {
    users: Arc<U>,
    oauth: Arc<dyn OAuthClient>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl<U> OAuthLoginService<U> {
    pub fn new(
        users: Arc<U>,
        oauth: Arc<dyn OAuthClient>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            oauth,
            tokens,
            clock,
        }
    }
}

impl<U: UserRepository> OAuthLoginService<U> {
    async fn register(&self, provider: &str, email: String, name: String) -> Result<User, Error> {
        let base = nickname_base(&email).to_owned();
        let sequence = self
            .users
            .next_nickname_sequence(&base)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        let nickname = Nickname::generated(&base, sequence)
            .map_err(|err| Error::internal(format!("nickname generation failed: {err}")))?;
        let user = User::register(
            UserId::random(),
            Some(provider.to_owned()),
            email,
            name,
            nickname,
            self.clock.utc(),
        );
        self.users
            .save(&user)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        info!(user_id = %user.id(), provider, "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U: UserRepository> LoginService for OAuthLoginService<U> {
    async fn login_with_oauth(
        &self,
        provider: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<LoginOutcome, Error> {
        let profile = self
            .oauth
            .fetch_profile(provider, code, redirect_uri)
            .await
            .map_err(map_oauth_error)?;

        let existing = self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        let (user, is_new_user) = match existing {
            Some(user) if user.is_deleted() => {
                return Err(Error::unauthorized("account was deleted"));
            }
            Some(user) => (user, false),
            None => (
                self.register(provider, profile.email, profile.name).await?,
                true,
            ),
        };

        let access_token = self.tokens.issue(user.id()).map_err(map_token_error)?;
        Ok(LoginOutcome {
            user_id: *user.id(),
            access_token,
            is_new_user,
        })
    }
}
