//! HTTP handlers for the todo resource, health and fallbacks.

pub mod common;
pub mod todo;
pub use common::*;
pub use todo::*;
