//! Plain-text endpoints outside the todo resource.

use axum::http::StatusCode;

/// GET /health
pub async fn health() -> &'static str {
    "Success"
}

/// Any unmatched path.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}
