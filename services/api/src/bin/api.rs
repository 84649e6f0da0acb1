//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{CommandTranscriber, CredentialStore, MemorySessionManager, MemoryStore},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState, ApiDoc},
};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use chrono::Duration;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use zoo_records_core::ports::UserDirectory;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Prepare Storage Directories & Credentials ---
    std::fs::create_dir_all(&config.uploads_dir)?;
    std::fs::create_dir_all(&config.reports_dir)?;

    let credentials = Arc::new(CredentialStore::load(&config.users_path)?);
    info!(
        "Loaded {} users from {}",
        credentials.len(),
        config.users_path.display()
    );
    let users: Arc<dyn UserDirectory> = credentials;

    // --- 3. Initialize Service Adapters ---
    let sessions = Arc::new(MemorySessionManager::with_ttl(
        users.clone(),
        Duration::hours(config.session_ttl_hours),
    ));
    let store = Arc::new(MemoryStore::new());
    let transcriber = Arc::new(CommandTranscriber::new(
        config.transcriber_python.clone(),
        config.transcriber_script.clone(),
        std::time::Duration::from_secs(config.transcribe_timeout_secs),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        sessions,
        store,
        transcriber,
        users,
        config.clone(),
    ));

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {e}")))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = build_router(app_state).layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
