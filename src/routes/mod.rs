//! Router assembly.

mod common;
mod todo;
pub use common::common_routes;
pub use todo::{todo_routes, TODO_PATH};

use crate::handlers::not_found;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};

/// Full application: todo resource, health, plain 404 for anything else.
/// The body limit is enforced by the `Bytes` extractor so oversized requests
/// reach the handlers as a rejection and are answered through the response writer.
pub fn app(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .merge(common_routes())
        .merge(todo_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
}
