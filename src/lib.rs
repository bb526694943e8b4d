//! Todo service: CRUD over a single `todo` table in SQLite, exposed at `/v1/todo`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{TodoRequestInput, TodoResponse, TodoTask};
pub use response::{write_response, ContentType, Cors, ResponseDecorator, ResponseWriter};
pub use routes::{app, common_routes, todo_routes};
pub use service::{RequestContext, TodoService};
pub use state::AppState;
pub use store::{connect_pool, ensure_todo_table, SqliteTodoStore, TodoStore};
