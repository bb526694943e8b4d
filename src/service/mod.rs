//! TodoService: orchestration between handlers and the store, bounded by a request deadline.

mod context;
mod todo;
mod validation;
pub use context::RequestContext;
pub use todo::TodoService;
pub use validation::RequestValidator;
