//! Response writer: header decorators applied before status and body.

use crate::error::{AppError, ErrorBody, ErrorDetail};
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;

/// Mutates the outgoing header set. Applied in order before the status and body are written.
pub trait ResponseDecorator: Send + Sync {
    fn decorate(&self, headers: &mut HeaderMap);
}

impl<F> ResponseDecorator for F
where
    F: Fn(&mut HeaderMap) + Send + Sync,
{
    fn decorate(&self, headers: &mut HeaderMap) {
        self(headers)
    }
}

/// Sets `Content-Type`.
#[derive(Clone, Debug)]
pub struct ContentType(HeaderValue);

impl ContentType {
    pub fn new(content_type: &'static str) -> Self {
        ContentType(HeaderValue::from_static(content_type))
    }

    pub fn json() -> Self {
        Self::new("application/json")
    }
}

impl ResponseDecorator for ContentType {
    fn decorate(&self, headers: &mut HeaderMap) {
        headers.insert(header::CONTENT_TYPE, self.0.clone());
    }
}

/// Allows credentialed cross-origin requests from one origin.
#[derive(Clone, Debug)]
pub struct Cors {
    allowed_origin: HeaderValue,
}

impl Cors {
    /// Falls back to `*` when the origin is not a valid header value.
    pub fn new(allowed_origin: &str) -> Self {
        let allowed_origin = HeaderValue::from_str(allowed_origin).unwrap_or_else(|_| {
            tracing::warn!(origin = %allowed_origin, "invalid CORS origin, using *");
            HeaderValue::from_static("*")
        });
        Cors { allowed_origin }
    }
}

impl ResponseDecorator for Cors {
    fn decorate(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allowed_origin.clone());
    }
}

/// Builds the complete response in one step: decorators, then status, then body.
pub fn write_response(
    status: StatusCode,
    body: impl Into<Body>,
    decorators: &[Arc<dyn ResponseDecorator>],
) -> Response {
    let mut response = Response::new(body.into());
    for decorator in decorators {
        decorator.decorate(response.headers_mut());
    }
    *response.status_mut() = status;
    response
}

/// JSON writer holding the decorator chain every todo response goes through.
#[derive(Clone)]
pub struct ResponseWriter {
    decorators: Vec<Arc<dyn ResponseDecorator>>,
}

impl ResponseWriter {
    pub fn new(decorators: Vec<Arc<dyn ResponseDecorator>>) -> Self {
        ResponseWriter { decorators }
    }

    /// `Content-Type: application/json` plus CORS for `allowed_origin`.
    pub fn json_with_cors(allowed_origin: &str) -> Self {
        Self::new(vec![
            Arc::new(ContentType::json()),
            Arc::new(Cors::new(allowed_origin)),
        ])
    }

    /// Copy of this writer with one more decorator applied last.
    pub fn with_decorator(&self, decorator: Arc<dyn ResponseDecorator>) -> Self {
        let mut decorators = self.decorators.clone();
        decorators.push(decorator);
        ResponseWriter { decorators }
    }

    pub fn json<T: Serialize>(&self, status: StatusCode, data: &T) -> Response {
        match serde_json::to_vec(data) {
            Ok(bytes) => write_response(status, bytes, &self.decorators),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response");
                let body = ErrorBody {
                    error: ErrorDetail {
                        code: "serialization_error".to_string(),
                        message: format!("failed to serialize response: {}", e),
                    },
                };
                let bytes = serde_json::to_vec(&body).unwrap_or_default();
                write_response(StatusCode::INTERNAL_SERVER_ERROR, bytes, &self.decorators)
            }
        }
    }

    pub fn error(&self, err: &AppError) -> Response {
        let (status, _) = err.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        } else {
            tracing::debug!(error = %err, "request rejected");
        }
        self.json(status, &err.body())
    }

    pub fn result<T: Serialize>(&self, result: Result<T, AppError>) -> Response {
        match result {
            Ok(data) => self.json(StatusCode::OK, &data),
            Err(e) => self.error(&e),
        }
    }
}
