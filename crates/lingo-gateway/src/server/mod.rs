//! Gateway server setup
//!
//! Provides the WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use lingo_cache::{MemoryStore, RedisPool, RedisStore, RoomStore};
use lingo_common::{AppConfig, AppError, CorsConfig, StorageBackend};
use lingo_core::{KeyValueStore, StorageError};
use lingo_translate::{HttpTranslator, TranslationPipeline};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    let cors = create_cors_layer(&state.config().cors, state.config().app.env.is_production());
    create_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow the configured origins, or any origin when none are configured
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!("CORS: Allowing any origin. Configure CORS_ALLOWED_ORIGINS for production.");
        }
        return CorsLayer::new().allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS: Allowing {} configured origins", origins.len());
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Open the configured key-value store
async fn create_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>, AppError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; rooms and history are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Redis => {
            let redis_config = config
                .storage
                .redis
                .as_ref()
                .ok_or_else(|| AppError::Config("REDIS_URL is required for the redis backend".to_string()))?;

            tracing::info!("Connecting to Redis...");
            let pool = RedisPool::from_config(redis_config).map_err(StorageError::from)?;
            pool.health_check().await.map_err(StorageError::from)?;
            tracing::info!("Redis connection established");

            Ok(Arc::new(RedisStore::new(pool)))
        }
    }
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    let store = create_store(&config).await?;
    let room_store = RoomStore::new(store, config.history.capacity);

    let translator = HttpTranslator::from_config(&config.translator);
    tracing::info!(
        url = %config.translator.url,
        timeout_ms = config.translator.timeout_ms,
        "Translator configured"
    );
    let pipeline = TranslationPipeline::new(Arc::new(translator));

    Ok(GatewayState::new(config, room_store, pipeline))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::server(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::server(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid gateway address: {e}")))?;

    let state = create_gateway_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
