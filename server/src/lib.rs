//! In-memory todo service.
//!
//! # Overview
//! Serves CRUD routes under `/api/todos` over a [`TodoStore`] that lives for
//! the lifetime of the process.
//!
//! # Design
//! - The store is built once in [`app`] / [`app_with_store`] and handed to the
//!   handlers as router state.
//! - Handlers return `Result<_, AppError>`; `AppError` renders the
//!   `{ "error": ... }` body.
//! - Panics inside a handler become a 500 with the same body shape.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::{any::Any, sync::Arc};

use axum::{
    response::{IntoResponse, Response},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use config::{ConfigError, ServerConfig};
pub use error::{AppError, ErrorBody};
pub use model::{CreateTodo, Todo};
pub use store::{StoreError, TodoStore};

pub type SharedStore = Arc<RwLock<TodoStore>>;

/// Router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(Arc::new(RwLock::new(TodoStore::new())))
}

pub fn app_with_store(store: SharedStore) -> Router {
    with_error_boundary(
        Router::new()
            .merge(routes::health_routes())
            .merge(routes::todo_routes(store)),
    )
}

/// JSON 404 for unknown routes, JSON 500 for panics, request tracing.
pub fn with_error_boundary(router: Router) -> Router {
    router
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(detail).into_response()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "todo server listening");
    }
    axum::serve(listener, app()).await
}
