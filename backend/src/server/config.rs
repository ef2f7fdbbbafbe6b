//! Application settings loaded via OrthoConfig.
//!
//! Every field can come from a `--kebab-case` flag, a `PMEET_*` environment
//! variable or the configuration file. Unset fields fall back to the
//! defaults exposed by the accessor methods.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pmeet::outbound::auth::{JWT_SECRET_MIN_LEN, JwtSecret};
use pmeet::outbound::oauth::OAuthProviderConfig;
use pmeet::outbound::persistence::StoreConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DATABASE: &str = "pmeet";
const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_NOTIFICATION_BUFFER: usize = 256;
const DEFAULT_OAUTH_TIMEOUT_SECS: u64 = 10;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const KAKAO_TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const KAKAO_USERINFO_URL: &str = "https://kapi.kakao.com/v2/user/me";

/// Reasons the loaded settings cannot start a server.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a socket address: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("jwt_secret must be set outside development builds")]
    MissingJwtSecret,
    #[error("jwt_secret must be at least {JWT_SECRET_MIN_LEN} bytes, got {0}")]
    ShortJwtSecret(usize),
    #[error("access_token_ttl_minutes must be positive, got {0}")]
    TokenTtl(i64),
    #[error("notification_buffer must be positive")]
    NotificationBuffer,
    #[error("{field} is not a valid URL: {source}")]
    Url {
        field: &'static str,
        source: url::ParseError,
    },
}

/// Settings for the HTTP server and its adapters.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PMEET")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding every collection.
    pub mongodb_database: Option<String>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in minutes.
    pub access_token_ttl_minutes: Option<i64>,
    /// Per-user buffer of the live notification channel.
    pub notification_buffer: Option<usize>,
    /// Timeout applied to provider token and profile calls, in seconds.
    pub oauth_timeout_secs: Option<u64>,
    pub oauth_google_client_id: Option<String>,
    pub oauth_google_client_secret: Option<String>,
    pub oauth_google_token_url: Option<String>,
    pub oauth_google_userinfo_url: Option<String>,
    pub oauth_kakao_client_id: Option<String>,
    pub oauth_kakao_client_secret: Option<String>,
    pub oauth_kakao_token_url: Option<String>,
    pub oauth_kakao_userinfo_url: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("mongodb_database", &self.mongodb_database)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("notification_buffer", &self.notification_buffer)
            .field("oauth_google_client_id", &self.oauth_google_client_id)
            .field("oauth_kakao_client_id", &self.oauth_kakao_client_id)
            .finish_non_exhaustive()
    }
}

struct ProviderFields<'a> {
    name: &'static str,
    client_id: Option<&'a str>,
    client_secret: Option<&'a str>,
    token_url: (&'static str, Option<&'a str>, &'static str),
    userinfo_url: (&'static str, Option<&'a str>, &'static str),
}

fn parse_url(
    (field, configured, default): (&'static str, Option<&str>, &'static str),
) -> Result<Url, SettingsError> {
    Url::parse(configured.unwrap_or(default)).map_err(|source| SettingsError::Url { field, source })
}

impl AppSettings {
    /// Listener address, `0.0.0.0:8080` by default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// MongoDB connection settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI),
            self.mongodb_database
                .as_deref()
                .unwrap_or(DEFAULT_MONGODB_DATABASE),
        )
    }

    /// Resolve the token signing secret.
    ///
    /// With `allow_ephemeral` a missing secret is replaced by a random one and
    /// a warning is logged; issued tokens then die with the process.
    pub fn jwt_secret(&self, allow_ephemeral: bool) -> Result<JwtSecret, SettingsError> {
        match self.jwt_secret.as_deref() {
            Some(raw) if raw.len() >= JWT_SECRET_MIN_LEN => Ok(JwtSecret::new(raw.as_bytes())),
            Some(raw) => Err(SettingsError::ShortJwtSecret(raw.len())),
            None if allow_ephemeral => {
                warn!("PMEET_JWT_SECRET unset; using an ephemeral signing secret (dev only)");
                Ok(JwtSecret::generate())
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }

    /// Access token lifetime; must be positive.
    pub fn access_token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        let minutes = self
            .access_token_ttl_minutes
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::TokenTtl(minutes));
        }
        Ok(chrono::Duration::minutes(minutes))
    }

    /// Per-user live notification buffer; must be positive.
    pub fn notification_buffer(&self) -> Result<usize, SettingsError> {
        match self.notification_buffer.unwrap_or(DEFAULT_NOTIFICATION_BUFFER) {
            0 => Err(SettingsError::NotificationBuffer),
            buffer => Ok(buffer),
        }
    }

    /// Timeout for each OAuth provider call.
    pub fn oauth_timeout(&self) -> Duration {
        Duration::from_secs(self.oauth_timeout_secs.unwrap_or(DEFAULT_OAUTH_TIMEOUT_SECS))
    }

    /// Providers whose client id and secret are both configured.
    pub fn oauth_providers(&self) -> Result<Vec<OAuthProviderConfig>, SettingsError> {
        let candidates = [
            ProviderFields {
                name: "google",
                client_id: self.oauth_google_client_id.as_deref(),
                client_secret: self.oauth_google_client_secret.as_deref(),
                token_url: (
                    "oauth_google_token_url",
                    self.oauth_google_token_url.as_deref(),
                    GOOGLE_TOKEN_URL,
                ),
                userinfo_url: (
                    "oauth_google_userinfo_url",
                    self.oauth_google_userinfo_url.as_deref(),
                    GOOGLE_USERINFO_URL,
                ),
            },
            ProviderFields {
                name: "kakao",
                client_id: self.oauth_kakao_client_id.as_deref(),
                client_secret: self.oauth_kakao_client_secret.as_deref(),
                token_url: (
                    "oauth_kakao_token_url",
                    self.oauth_kakao_token_url.as_deref(),
                    KAKAO_TOKEN_URL,
                ),
                userinfo_url: (
                    "oauth_kakao_userinfo_url",
                    self.oauth_kakao_userinfo_url.as_deref(),
                    KAKAO_USERINFO_URL,
                ),
            },
        ];

        let mut providers = Vec::new();
        for fields in candidates {
            let (Some(client_id), Some(client_secret)) = (fields.client_id, fields.client_secret)
            else {
                continue;
            };
            providers.push(OAuthProviderConfig {
                name: fields.name.to_owned(),
                token_url: parse_url(fields.token_url)?,
                userinfo_url: parse_url(fields.userinfo_url)?,
                client_id: client_id.to_owned(),
                client_secret: Zeroizing::new(client_secret.to_owned()),
            });
        }
        if providers.is_empty() {
            warn!("no OAuth providers configured; sign-in will reject every provider");
        }
        Ok(providers)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "PMEET_BIND_ADDR",
        "PMEET_MONGODB_URI",
        "PMEET_MONGODB_DATABASE",
        "PMEET_JWT_SECRET",
        "PMEET_ACCESS_TOKEN_TTL_MINUTES",
        "PMEET_NOTIFICATION_BUFFER",
        "PMEET_OAUTH_GOOGLE_CLIENT_ID",
        "PMEET_OAUTH_GOOGLE_CLIENT_SECRET",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("pmeet")]).expect("config should load")
    }

    /// Every variable cleared except the given overrides.
    fn env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
        let store = settings.store_config();
        assert_eq!(store.uri(), DEFAULT_MONGODB_URI);
        assert_eq!(store.database(), DEFAULT_MONGODB_DATABASE);
        assert_eq!(
            settings.access_token_ttl().expect("ttl"),
            chrono::Duration::minutes(60)
        );
        assert_eq!(settings.notification_buffer().expect("buffer"), 256);
        assert!(settings.oauth_providers().expect("providers").is_empty());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env(&[
            ("PMEET_BIND_ADDR", "127.0.0.1:9000"),
            ("PMEET_MONGODB_DATABASE", "pmeet_test"),
            ("PMEET_ACCESS_TOKEN_TTL_MINUTES", "15"),
            ("PMEET_OAUTH_GOOGLE_CLIENT_ID", "client"),
            ("PMEET_OAUTH_GOOGLE_CLIENT_SECRET", "secret"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address").port(),
            9000
        );
        assert_eq!(settings.store_config().database(), "pmeet_test");
        assert_eq!(
            settings.access_token_ttl().expect("ttl"),
            chrono::Duration::minutes(15)
        );
        let providers = settings.oauth_providers().expect("providers");
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "google");
        assert_eq!(providers[0].token_url.as_str(), GOOGLE_TOKEN_URL);
    }

    #[rstest]
    fn missing_secret_is_fatal_unless_ephemeral_allowed() {
        let _guard = lock_env(env(&[]));
        let settings = load_from_empty_args();
        assert!(matches!(
            settings.jwt_secret(false),
            Err(SettingsError::MissingJwtSecret)
        ));
        assert!(settings.jwt_secret(true).is_ok_and(|secret| !secret.is_empty()));
    }

    #[rstest]
    fn short_secret_is_rejected() {
        let _guard = lock_env(env(&[("PMEET_JWT_SECRET", "too-short")]));
        let settings = load_from_empty_args();
        assert!(matches!(
            settings.jwt_secret(true),
            Err(SettingsError::ShortJwtSecret(9))
        ));
    }

    #[rstest]
    #[case("0", false)]
    #[case("-5", false)]
    #[case("30", true)]
    fn token_ttl_must_be_positive(#[case] raw: &str, #[case] ok: bool) {
        let _guard = lock_env(env(&[("PMEET_ACCESS_TOKEN_TTL_MINUTES", raw)]));
        assert_eq!(load_from_empty_args().access_token_ttl().is_ok(), ok);
    }

    #[rstest]
    fn bad_bind_address_is_reported() {
        let _guard = lock_env(env(&[("PMEET_BIND_ADDR", "not-an-address")]));
        let error = load_from_empty_args().bind_addr().expect_err("invalid address");
        assert!(error.to_string().contains("not-an-address"));
    }
}
