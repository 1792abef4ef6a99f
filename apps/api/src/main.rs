mod ats_client;
mod config;
mod convert;
mod errors;
mod review;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats_client::AtsClient;
use crate::config::Config;
use crate::convert::HttpDocumentConverter;
use crate::review::session::ReviewSession;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumelens v{}", env!("CARGO_PKG_VERSION"));

    // Initialize capability clients
    let ats = AtsClient::new(config.ats_base_url.clone());
    info!("ATS client initialized ({})", config.ats_base_url);

    let converter = Arc::new(HttpDocumentConverter::new(config.convert_url.clone()));
    info!("Document converter initialized ({})", config.convert_url);

    // Build app state with a fresh review session
    let state = AppState {
        ats,
        converter,
        session: Arc::new(Mutex::new(ReviewSession::new())),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
