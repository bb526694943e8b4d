//! Todo entity and its wire shapes.

use serde::{Deserialize, Serialize};

/// Message carried by every successful response.
pub const SUCCESS_MESSAGE: &str = "Success";

/// One row of the `todo` table.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct TodoTask {
    pub id: i64,
    pub name: Option<String>,
    pub completed: bool,
}

/// Create/update command as decoded from a JSON body. Every field is optional on the wire;
/// [`crate::service::RequestValidator`] decides which ones a command actually needs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoRequestInput {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub completed: Option<bool>,
}

/// Result of a todo operation. Absent fields are left out of the JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoResponse {
    /// Bare `{"message":"Success"}`.
    pub fn success() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            ..Default::default()
        }
    }
}

impl From<TodoTask> for TodoResponse {
    fn from(task: TodoTask) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            id: Some(task.id),
            name: task.name,
            completed: Some(task.completed),
        }
    }
}
