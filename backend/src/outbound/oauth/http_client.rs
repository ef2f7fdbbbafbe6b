//! Reqwest-backed OAuth authorisation-code adapter.
//!
//! This adapter owns transport details only: the code exchange, the profile
//! request, timeout and HTTP error mapping, and JSON decoding into
//! [`OAuthProfile`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{ProfileResponseDto, TokenResponseDto};
use crate::domain::ports::{OAuthClient, OAuthClientError, OAuthProfile};

const USER_AGENT: &str = "pmeet-backend/0.1";

/// Endpoints and credentials of one OAuth provider.
#[derive(Clone)]
pub struct OAuthProviderConfig {
    /// Provider key used in the login route, e.g. `google`.
    pub name: String,
    /// Token endpoint the authorisation code is exchanged at.
    pub token_url: Url,
    /// Endpoint returning the signed-in user's profile.
    pub userinfo_url: Url,
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("name", &self.name)
            .field("token_url", &self.token_url.as_str())
            .field("userinfo_url", &self.userinfo_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// OAuth adapter holding one configuration per provider.
pub struct HttpOAuthClient {
    client: Client,
    providers: HashMap<String, OAuthProviderConfig>,
}

impl HttpOAuthClient {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        providers: impl IntoIterator<Item = OAuthProviderConfig>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let providers = providers
            .into_iter()
            .map(|provider| (provider.name.to_ascii_lowercase(), provider))
            .collect();
        Ok(Self { client, providers })
    }

    fn provider(&self, name: &str) -> Result<&OAuthProviderConfig, OAuthClientError> {
        self.providers
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| OAuthClientError::unknown_provider(name))
    }

    async fn exchange_code(
        &self,
        provider: &OAuthProviderConfig,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Zeroizing<String>, OAuthClientError> {
        let response = self
            .client
            .post(provider.token_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", provider.client_id.as_str()),
                ("client_secret", provider.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let token: TokenResponseDto = serde_json::from_slice(&body).map_err(|error| {
            OAuthClientError::rejected(format!("invalid token response: {error}"))
        })?;
        Ok(Zeroizing::new(token.access_token))
    }

    async fn read_profile(
        &self,
        provider: &OAuthProviderConfig,
        access_token: &str,
    ) -> Result<OAuthProfile, OAuthClientError> {
        let response = self
            .client
            .get(provider.userinfo_url.clone())
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_profile(&provider.name, body.as_ref())
    }
}

#[async_trait]
impl OAuthClient for HttpOAuthClient {
    async fn fetch_profile(
        &self,
        provider: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<OAuthProfile, OAuthClientError> {
        let config = self.provider(provider)?;
        let access_token = self.exchange_code(config, code, redirect_uri).await?;
        let profile = self.read_profile(config, &access_token).await?;
        debug!(provider = %config.name, "oauth profile fetched");
        Ok(profile)
    }
}

fn parse_profile(provider: &str, body: &[u8]) -> Result<OAuthProfile, OAuthClientError> {
    let decoded: ProfileResponseDto = serde_json::from_slice(body).map_err(|error| {
        OAuthClientError::rejected(format!("invalid profile payload: {error}"))
    })?;
    let (email, name) = decoded
        .into_identity()
        .map_err(OAuthClientError::rejected)?;
    Ok(OAuthProfile {
        provider: provider.to_owned(),
        email,
        name,
    })
}

fn map_transport_error(error: reqwest::Error) -> OAuthClientError {
    OAuthClientError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> OAuthClientError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    if status.is_client_error() {
        OAuthClientError::rejected(message)
    } else {
        OAuthClientError::transport(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
