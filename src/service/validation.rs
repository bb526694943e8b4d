//! Payload policy for create/update commands.

use crate::error::AppError;
use crate::model::{TodoRequestInput, TodoTask};

pub struct RequestValidator;

impl RequestValidator {
    /// `id` is required; `name` stays absent when omitted and `completed` defaults to false.
    /// Update uses the same rule, so it replaces both fields.
    pub fn validate(input: &TodoRequestInput) -> Result<TodoTask, AppError> {
        let id = input
            .id
            .ok_or_else(|| AppError::BadRequest("id is required".into()))?;
        Ok(TodoTask {
            id,
            name: input.name.clone(),
            completed: input.completed.unwrap_or(false),
        })
    }
}
