//! Backend entry-point: loads settings, connects MongoDB and serves the REST
//! API, the notification stream and the OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pmeet::domain::NotificationHub;
use pmeet::inbound::http::health::HealthState;
use pmeet::outbound::auth::JwtTokenService;
use pmeet::outbound::oauth::HttpOAuthClient;
use pmeet::outbound::persistence::MongoStore;
use server::{AppSettings, Infrastructure, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr()?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let secret = settings.jwt_secret(cfg!(debug_assertions))?;
    let tokens = Arc::new(JwtTokenService::new(
        &secret,
        settings.access_token_ttl()?,
        clock.clone(),
    ));
    let oauth = Arc::new(
        HttpOAuthClient::new(settings.oauth_providers()?, settings.oauth_timeout())
            .wrap_err("failed to build OAuth client")?,
    );

    let store_config = settings.store_config();
    let store = MongoStore::connect(&store_config)
        .await
        .wrap_err("failed to configure MongoDB client")?;
    store.ping().await.wrap_err("MongoDB is unreachable")?;
    store
        .ensure_indexes()
        .await
        .wrap_err("failed to create MongoDB indexes")?;

    let hub = NotificationHub::new(settings.notification_buffer()?);
    let http_state = build_http_state(Infrastructure {
        store,
        hub: hub.clone(),
        tokens,
        oauth,
        clock,
    });

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, database = store_config.database(), "starting pmeet backend");
    create_server(health_state, http_state, bind_addr)?.await?;
    hub.shutdown();
    Ok(())
}
