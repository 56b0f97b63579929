//! Health check endpoint for service monitoring.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub message: String,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "healthy"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "healthy".to_string(),
    })
}
