//! The versioned todo resource: one path, dispatch by verb.

use crate::handlers::{create, delete as delete_handler, list, method_not_allowed, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub const TODO_PATH: &str = "/v1/todo";

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route(
            TODO_PATH,
            get(list)
                .post(create)
                .put(update)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}
