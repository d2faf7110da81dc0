//! Wire types served by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// `POST /api/todos` payload. A missing title deserializes to `None` so the
/// handler can answer with the usual validation error.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
}
