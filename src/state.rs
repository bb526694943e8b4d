//! Shared application state for all routes. Built once at startup and cloned per request.

use crate::config::AppConfig;
use crate::response::ResponseWriter;
use crate::service::{RequestContext, TodoService};
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub service: TodoService,
    /// Content-Type and CORS decorators for every todo response.
    pub writer: ResponseWriter,
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(service: TodoService, config: &AppConfig) -> Self {
        AppState {
            service,
            writer: ResponseWriter::json_with_cors(&config.cors.allowed_origin),
            request_timeout: config.request_timeout(),
            body_limit: config.body_limit_bytes,
        }
    }

    /// Fresh deadline for one inbound request.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
