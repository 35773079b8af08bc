mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod precheck;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::precheck::registry::RegionPackRegistry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgJobCardStore, PgProfileStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Applytrail API v{}", env!("CARGO_PKG_VERSION"));

    // Region packs are validated before anything touches the network
    let packs = RegionPackRegistry::builtin(&config.default_region, &config.default_track)?;

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    let state = AppState {
        packs: Arc::new(packs),
        profiles: Arc::new(PgProfileStore::new(db.clone())),
        job_cards: Arc::new(PgJobCardStore::new(db)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
