use std::sync::Arc;

use anyhow::Context;
use ebms_gateway::{
    AppState, DescriptorTable, IdentityState, InMemoryIdentityStore,
    config::{AppConfig, Env},
    create_router, routes,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initializes logging, builds and audits the endpoint
/// table, then serves HTTP.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads variables from a local `.env` file when present, then reads the
    // process environment. Missing production secrets abort here.
    dotenv::dotenv().ok();
    let config = AppConfig::load().context("invalid configuration")?;

    // 2. Logging Initialization (Tracing)
    // RUST_LOG wins; otherwise debug for this crate and info for tower-http.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ebms_gateway=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            // Human-readable, multi-line output for development.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("EBMS gateway starting in {:?} mode", config.env);

    // Config loading runs before the subscriber exists, so its fallbacks are
    // reported from here.
    if config.uses_fallback_secret() {
        tracing::warn!("JWT_SECRET not set, using the local development secret");
    }

    // 3. Endpoint Descriptor Table
    // Either the operator's route file or the built-in catalog. Both go through
    // the same startup audit; any inconsistency stops the process.
    let table = match &config.routes_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading endpoint descriptors from file");
            DescriptorTable::from_json_file(path)
        }
        None => DescriptorTable::new(routes::ebms_catalog()),
    }
    .inspect_err(|e| tracing::error!(error = %e, "endpoint table rejected"))?;
    tracing::info!(endpoints = table.len(), "endpoint table loaded");

    // 4. Identity Store
    // Wrapped in an Arc for thread-safe sharing with the login route.
    let identities: IdentityState = match config.env {
        Env::Local => {
            tracing::info!("seeding demo accounts");
            Arc::new(InMemoryIdentityStore::with_demo_accounts()?)
        }
        Env::Production => {
            tracing::warn!("no identity backend configured, logins will be rejected");
            Arc::new(InMemoryIdentityStore::new())
        }
    };

    // 5. Unified State Assembly. An inconsistent table aborts startup here.
    let port = config.port;
    let app_state = AppState::new(config, table, identities)
        .inspect_err(|e| tracing::error!(error = %e, "refusing to serve traffic"))?;

    // 6. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener on every interface.

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("EBMS API listening on {addr}");
    tracing::info!("API Documentation (Swagger UI) available at: http://localhost:{port}/swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
