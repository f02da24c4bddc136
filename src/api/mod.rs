//! HTTP API module for Tenantry
//!
//! Provides REST endpoints for buildings and interests under `/api/v1`.

mod auth;
mod building_routes;
mod interest_routes;
pub mod routes;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::handlers::{BuildingHandler, InterestHandler};

use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub buildings: BuildingHandler,
    pub interests: InterestHandler,
    pub api_key: Option<String>,
}

impl AppState {
    /// Build the handlers around one shared database
    pub fn new(db: Arc<Database>, config: &Config) -> Self {
        AppState {
            buildings: BuildingHandler::new(db.clone()),
            interests: InterestHandler::with_concurrency(
                db,
                config.resolve.max_concurrent_lookups,
            ),
            api_key: config.server.api_key.clone(),
        }
    }
}

/// Start the HTTP API server
pub async fn serve(addr: SocketAddr, db: Arc<Database>, config: &Config) -> Result<()> {
    let app = create_router(AppState::new(db, config));

    // Check if port is already in use (another instance running)
    if tokio::net::TcpStream::connect(addr).await.is_ok() {
        tracing::error!(
            "Port {} is already in use. Use `curl http://{}/health` to check.",
            addr.port(),
            addr
        );
        return Err(crate::error::CoreError::Api(format!(
            "Port {} already in use",
            addr.port()
        )));
    }

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| crate::error::CoreError::Api(e.to_string()))?;

    Ok(())
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/buildings",
            get(building_routes::list_buildings).post(building_routes::create_building),
        )
        .route(
            "/buildings/:id",
            get(building_routes::get_building)
                .put(building_routes::update_building)
                .delete(building_routes::delete_building),
        )
        .route(
            "/interests",
            get(interest_routes::list_interests).post(interest_routes::create_interest),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (public, no auth required)
        .route("/health", get(routes::health))
        .nest("/api/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
