//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ClassifyRequest, ClassifyResponse, ComparisonResponse, FederatedRequest,
        FederatedResponse, HealthResponse, LevelRequest, LevelResponse, LoginRequest,
        OptimizeRequest, SampleRequest, SessionResponse,
    },
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use privopt_core::{
    Comparison, DeviceProfile, PrivoptError, TrackingReport, UsagePolicy, default_fleet,
    default_trackers, federated, primitives::DEFAULT_FEDERATED_ROUNDS, sample_fleet, seeded_rng,
};

/// Map a core error onto an HTTP status.
fn status_for(error: &PrivoptError) -> StatusCode {
    match error {
        PrivoptError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PrivoptError::NotLoggedIn => StatusCode::UNAUTHORIZED,
        PrivoptError::SerializationError(_) | PrivoptError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Unwrap a JSON body. Malformed or mistyped bodies become `InvalidInput`,
/// so they answer 400 with the usual envelope instead of axum's plain-text
/// rejection.
fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, PrivoptError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| PrivoptError::InvalidInput(rejection.body_text()))
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// OPTIMIZE HANDLERS
// =============================================================================

fn comparison_response(fleet: &[DeviceProfile]) -> (StatusCode, Json<ComparisonResponse>) {
    match Comparison::run(fleet) {
        Ok(comparison) => {
            tracing::debug!(devices = comparison.len(), "Optimization pass complete");
            (
                StatusCode::OK,
                Json(ComparisonResponse::from_comparison(&comparison)),
            )
        }
        Err(e) => (
            status_for(&e),
            Json(ComparisonResponse::error(format!("Optimization failed: {}", e))),
        ),
    }
}

/// Run the optimization pass over a submitted fleet.
pub async fn optimize_handler(
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    match read_body(payload).and_then(|request| request.to_fleet()) {
        Ok(fleet) => comparison_response(&fleet),
        Err(e) => (
            status_for(&e),
            Json(ComparisonResponse::error(format!("Invalid request: {}", e))),
        ),
    }
}

/// Run the optimization pass over the built-in fleet.
pub async fn default_optimize_handler() -> impl IntoResponse {
    comparison_response(&default_fleet())
}

/// Run the optimization pass over a seeded, sampled fleet.
pub async fn sample_handler(
    payload: Result<Json<SampleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let fleet = read_body(payload)
        .and_then(|request| sample_fleet(request.count, &mut seeded_rng(request.seed)));
    match fleet {
        Ok(fleet) => comparison_response(&fleet),
        Err(e) => (
            status_for(&e),
            Json(ComparisonResponse::error(format!("Sampling failed: {}", e))),
        ),
    }
}

// =============================================================================
// CLASSIFY / LEVEL HANDLERS
// =============================================================================

/// Classify the privacy risk of a data-access set and network level.
pub async fn classify_handler(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> impl IntoResponse {
    match read_body(payload).and_then(|request| request.classify()) {
        Ok(risk) => (StatusCode::OK, Json(ClassifyResponse::success(risk))),
        Err(e) => (status_for(&e), Json(ClassifyResponse::error(e.to_string()))),
    }
}

/// Map a usage label to its numeric level.
pub async fn level_handler(
    payload: Result<Json<LevelRequest>, JsonRejection>,
) -> impl IntoResponse {
    match read_body(payload).and_then(|request| UsagePolicy::to_level(&request.label)) {
        Ok(level) => (StatusCode::OK, Json(LevelResponse::success(level.value()))),
        Err(e) => (status_for(&e), Json(LevelResponse::error(e.to_string()))),
    }
}

// =============================================================================
// TRACKING HANDLER
// =============================================================================

/// Raw-data tracking report for the built-in trackers.
pub async fn tracking_handler() -> impl IntoResponse {
    let report = TrackingReport::build(&default_trackers());
    if report.raw_tracking > 0 {
        tracing::warn!(
            raw_tracking = report.raw_tracking,
            "Devices detected tracking raw user data"
        );
    }
    Json(report)
}

// =============================================================================
// SESSION HANDLERS
// =============================================================================

/// Log the server session in. Any credentials are accepted.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(e) => return (status_for(&e), Json(SessionResponse::error(e.to_string()))),
    };

    let mut session = state.session.write().await;
    session.login(request.username, &request.password);
    tracing::info!(event = "login", "Session logged in");
    (StatusCode::OK, Json(SessionResponse::from(&*session)))
}

/// Log the server session out.
pub async fn logout_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    session.logout();
    tracing::info!(event = "logout", "Session logged out");
    Json(SessionResponse::from(&*session))
}

/// Current session state.
pub async fn session_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    Json(SessionResponse::from(&*session))
}

// =============================================================================
// FEDERATED HANDLER
// =============================================================================

/// Run a seeded federated averaging simulation. Requires a logged-in session.
pub async fn federated_handler(
    State(state): State<AppState>,
    payload: Result<Json<FederatedRequest>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(e) = state.session.read().await.require_login() {
        return (status_for(&e), Json(FederatedResponse::error(e.to_string())));
    }

    let outcome = read_body(payload).and_then(|request| {
        let rounds = request.rounds.unwrap_or(DEFAULT_FEDERATED_ROUNDS);
        federated::simulate(rounds, &mut seeded_rng(request.seed))
    });
    match outcome {
        Ok(outcome) => (StatusCode::OK, Json(FederatedResponse::success(outcome))),
        Err(e) => (status_for(&e), Json(FederatedResponse::error(e.to_string()))),
    }
}
