//! Common routes: health.

use crate::handlers::health;
use axum::{routing::get, Router};

/// GET /health (no state).
pub fn common_routes() -> Router {
    Router::new().route("/health", get(health))
}
