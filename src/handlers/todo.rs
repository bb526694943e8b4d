//! /v1/todo handlers: POST create, GET list, PUT update, DELETE delete.
//! Each handler parses its input, calls the service under the request deadline and
//! writes the result (or the mapped error) through the state's response writer.

use crate::error::AppError;
use crate::model::TodoRequestInput;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Methods served on /v1/todo, advertised on 405.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

/// `ids=1,2,3`; missing or empty means no ids.
pub fn parse_ids(raw: Option<&str>) -> Result<Vec<i64>, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(s) => s,
    };
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", part)))
        })
        .collect()
}

fn parse_body(body: &[u8]) -> Result<TodoRequestInput, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

pub type IdsQuery = Result<Query<HashMap<String, String>>, QueryRejection>;

fn ids_param(query: IdsQuery) -> Result<Vec<i64>, AppError> {
    let Query(params) = query?;
    parse_ids(params.get("ids").map(String::as_str))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let ctx = state.request_context();
    let result = async {
        let input = parse_body(&body?)?;
        state.service.create_task(&ctx, &input).await
    }
    .await;
    state.writer.result(result)
}

pub async fn list(
    State(state): State<AppState>,
    query: IdsQuery,
) -> Response {
    let ctx = state.request_context();
    let result = async {
        let ids = ids_param(query)?;
        state.service.get_tasks(&ctx, &ids).await
    }
    .await;
    state.writer.result(result)
}

pub async fn update(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let ctx = state.request_context();
    let result = async {
        let input = parse_body(&body?)?;
        state.service.update_task(&ctx, &input).await
    }
    .await;
    state.writer.result(result)
}

pub async fn delete(
    State(state): State<AppState>,
    query: IdsQuery,
) -> Response {
    let ctx = state.request_context();
    let result = async {
        let ids = ids_param(query)?;
        state.service.delete_tasks(&ctx, &ids).await
    }
    .await;
    state.writer.result(result)
}

/// Any other verb on /v1/todo.
pub async fn method_not_allowed(State(state): State<AppState>) -> Response {
    state
        .writer
        .with_decorator(Arc::new(|headers: &mut HeaderMap| {
            headers.insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }))
        .error(&AppError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_ids_mean_none() {
        assert!(parse_ids(None).unwrap().is_empty());
        assert!(parse_ids(Some("")).unwrap().is_empty());
        assert!(parse_ids(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn comma_separated_ids_parse_in_order() {
        assert_eq!(parse_ids(Some("3,1, 2")).unwrap(), vec![3, 1, 2]);
        assert_eq!(parse_ids(Some("-4")).unwrap(), vec![-4]);
    }

    #[test]
    fn malformed_ids_are_bad_requests() {
        for raw in ["a", "1,b", "1,,2", "1.5", "1,"] {
            let err = parse_ids(Some(raw)).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{raw}: {err:?}");
        }
    }

    #[test]
    fn body_must_be_a_todo_object() {
        assert!(matches!(parse_body(b"{not json"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_body(b"42"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_body(br#"{"id":"one"}"#), Err(AppError::BadRequest(_))));
        let input = parse_body(br#"{"id":1,"name":"a","completed":true}"#).unwrap();
        assert_eq!(input.id, Some(1));
    }
}
