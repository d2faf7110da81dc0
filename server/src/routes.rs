//! JSON routes over the shared store.
//!
//! Each handler takes the store lock once and holds it for the whole
//! validate -> mutate -> respond cycle.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::model::{CreateTodo, Todo};
use crate::store::StoreError;
use crate::SharedStore;

pub fn todo_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(toggle_todo).delete(delete_todo))
        .with_state(store)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

pub async fn not_found() -> AppError {
    AppError::UnknownRoute
}

/// Parse the `:id` segment. Anything but a plain unsigned integer is a 400.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<Todo>> {
    let store = store.read().await;
    Json(store.list().to_vec())
}

async fn create_todo(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    // A body that is not JSON, or whose title is not a string, counts as a
    // missing title.
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable create payload");
            CreateTodo::default()
        }
    };
    let title = input
        .title
        .ok_or_else(|| AppError::from(StoreError::EmptyTitle))?;

    let todo = store.write().await.create(&title)?;
    tracing::info!(id = todo.id, title = %todo.title, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id)?;
    let todo = store.write().await.toggle(id)?;
    tracing::info!(id, completed = todo.completed, "todo toggled");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    store.write().await.remove(id)?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
