use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use greenroom_api::config::Config;
use greenroom_api::db::create_pool;
use greenroom_api::inference::{InferenceClient, GENERATION_MODEL};
use greenroom_api::routes::build_router;
use greenroom_api::screening::sessions::SessionStore;
use greenroom_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (every variable has a default)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("greenroom_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Greenroom API v{}", env!("CARGO_PKG_VERSION"));

    // Open SQLite and apply migrations
    let db = create_pool(&config.database_url).await?;

    // Initialize inference client
    let inference = InferenceClient::new(config.hf_api_token.clone());
    if inference.has_credential() {
        info!("Inference client initialized (generation model: {GENERATION_MODEL})");
    } else {
        info!("No inference credential configured; static question banks will be used");
    }

    // Build app state
    let state = AppState {
        db,
        inference,
        sessions: Arc::new(SessionStore::new()),
        config: config.clone(),
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
