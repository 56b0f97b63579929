//! HTTP request handlers (route handlers).
//!
//! Only the liveness route lives here; the task endpoints are served by a
//! separate component.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Health check endpoint
pub mod health;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(health::health_check))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
}
