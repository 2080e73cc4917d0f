//! Dashboard HTTP API
//!
//! HTTP layer of the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - HTML entry point (`?city=hanoi` selects the city)
//! - `GET /static/dashboard.js` - Browser runtime
//! - `GET /static/dashboard.css` - Stylesheet
//! - `GET /assets/*` - Photos, logos and icons
//! - `GET /api/v1/layout?city=..&tab=..` - View tree of a page as JSON
//!
//! ## Callbacks
//! - `POST /_callback` - Run the callbacks affected by a property change
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ecofood::api::{serve, AppState};
//! use ecofood::config::Config;
//! use ecofood::data::Datasets;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let datasets = Datasets::load(&config.data.data_dir)?;
//!     serve(AppState::new(datasets, config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/layout", get(routes::pages::layout));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state);
    let assets = ServeDir::new(&state.config.data.assets_dir);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/_callback", post(routes::callback::dispatch))
        .route("/static/dashboard.js", get(routes::pages::dashboard_js))
        .route("/static/dashboard.css", get(routes::pages::dashboard_css))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive in debug mode, otherwise limited to the configured origins
fn cors_layer(state: &AppState) -> CorsLayer {
    let server = &state.config.server;
    if server.debug {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state
        .config
        .server
        .addr()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let debug_mode = state.config.server.debug;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, debug = debug_mode, "EcoFoodSystems dashboard listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
