//! # privopt HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /optimize` - Optimization pass over a submitted fleet
//! - `GET /optimize/default` - Optimization pass over the built-in fleet
//! - `POST /sample` - Optimization pass over a seeded, sampled fleet
//! - `POST /classify` - Privacy risk of a data-access set and network level
//! - `POST /level` - Numeric value of a usage label
//! - `GET /tracking` - Raw-data tracking report
//! - `GET /session`, `POST /session/login`, `POST /session/logout` - Session state
//! - `POST /federated` - Seeded federated averaging (requires login)
//!
//! ## Configuration (Environment Variables)
//!
//! - `PRIVOPT_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `PRIVOPT_RATE_LIMIT`: Requests per second (default: 100, 0 to disable), see [`RateLimit`]

mod handlers;
mod middleware;
mod types;

pub use middleware::{DEFAULT_REQUESTS_PER_SECOND, RateLimit, SharedLimiter};
pub use types::{
    ClassifyRequest, ClassifyResponse, ComparisonResponse, DeviceJson, FederatedRequest,
    FederatedResponse, HealthResponse, LevelRequest, LevelResponse, LoginRequest,
    OptimizeRequest, SampleRequest, SessionResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use privopt_core::{PrivoptError, Session};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MiB).
const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the one interactive session of this server.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
}

impl AppState {
    /// Create new app state around a session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `PRIVOPT_CORS_ORIGINS`.
///
/// - `"*"`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("PRIVOPT_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (PRIVOPT_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in PRIVOPT_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No PRIVOPT_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8501",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8501",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router, throttled according to `PRIVOPT_RATE_LIMIT`.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, RateLimit::from_env())
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Throttling - unless `limit` is `Disabled`
pub fn create_router_with_limit(state: AppState, limit: RateLimit) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/optimize", post(handlers::optimize_handler))
        .route("/optimize/default", get(handlers::default_optimize_handler))
        .route("/sample", post(handlers::sample_handler))
        .route("/classify", post(handlers::classify_handler))
        .route("/level", post(handlers::level_handler))
        .route("/tracking", get(handlers::tracking_handler))
        .route("/session", get(handlers::session_handler))
        .route("/session/login", post(handlers::login_handler))
        .route("/session/logout", post(handlers::logout_handler))
        .route("/federated", post(handlers::federated_handler));

    match limit.limiter() {
        Some(limiter) => {
            tracing::info!(?limit, "Throttling enabled");
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::throttle,
            ));
        }
        None => tracing::info!("Throttling disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and serve until Ctrl+C.
pub async fn run_server(addr: &str, session: Session) -> Result<(), PrivoptError> {
    let router = create_router(AppState::new(session));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PrivoptError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("privopt HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PrivoptError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
