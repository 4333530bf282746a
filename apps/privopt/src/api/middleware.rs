//! # Request Throttling
//!
//! One shared governor bucket sits in front of every privopt endpoint.
//! `PRIVOPT_RATE_LIMIT` sets its refill rate in requests per second; `0`
//! turns throttling off and an unparsable value falls back to 100.
//!
//! Throttled requests get the same `{success, error}` envelope as every
//! other failed call, with status 429.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;

/// Refill rate used when `PRIVOPT_RATE_LIMIT` is unset or unparsable.
pub const DEFAULT_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(100) {
    Some(rps) => rps,
    None => NonZeroU32::MIN,
};

/// Bucket shared by all routes of one router.
pub type SharedLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Throttling setting for the API router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Disabled,
    PerSecond(NonZeroU32),
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::PerSecond(DEFAULT_REQUESTS_PER_SECOND)
    }
}

impl RateLimit {
    /// Read `PRIVOPT_RATE_LIMIT`.
    pub fn from_env() -> Self {
        Self::parse(std::env::var("PRIVOPT_RATE_LIMIT").ok().as_deref())
    }

    /// Interpret a raw setting: `"0"` disables, a positive integer sets the
    /// rate, anything else (or nothing) keeps the default.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().parse::<u32>()) {
            Some(Ok(rps)) => NonZeroU32::new(rps).map_or(Self::Disabled, Self::PerSecond),
            Some(Err(_)) | None => Self::default(),
        }
    }

    /// Build the bucket, or `None` when throttling is off.
    pub fn limiter(self) -> Option<SharedLimiter> {
        match self {
            Self::Disabled => None,
            Self::PerSecond(rps) => Some(Arc::new(RateLimiter::direct(Quota::per_second(rps)))),
        }
    }
}

/// Reject the request with 429 once the bucket is empty.
pub async fn throttle(
    State(limiter): State<SharedLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if limiter.check().is_err() {
        tracing::warn!(path = %request.uri().path(), "Request throttled");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "success": false, "error": "Rate limit exceeded" })),
        )
            .into_response();
    }
    next.run(request).await
}
