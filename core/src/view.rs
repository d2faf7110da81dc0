//! Client-side view over the todo collection.
//!
//! # Design
//! `TodoView` owns a [`TodoClient`] and a host [`Transport`]. It keeps the
//! last fetched collection as a cache and derives everything it shows from
//! that cache on demand: the state, the stats, the rendered text.
//!
//! Mutations never patch the cache locally. A successful mutation
//! invalidates the cache and re-issues the list request, so what is shown is
//! always what the server last returned. Any failed request (transport
//! error or non-success status) moves the view into the error state; there is
//! no retry.

use std::fmt;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{CreateTodo, Todo};

/// What the view currently shows. Checked in this order: loading, error,
/// empty, populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [Todo]),
}

/// Counts derived from a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub active: usize,
    pub completed: usize,
}

impl Stats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|todo| todo.completed).count();
        Self {
            active: todos.len() - completed,
            completed,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} items left", self.active)?;
        write!(f, "{} completed", self.completed)
    }
}

pub struct TodoView<T> {
    client: TodoClient,
    transport: T,
    loading: bool,
    error: Option<String>,
    todos: Option<Vec<Todo>>,
}

impl<T: Transport> TodoView<T> {
    /// A view that has not fetched anything yet; it starts out loading.
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            loading: true,
            error: None,
            todos: None,
        }
    }

    pub fn state(&self) -> ViewState<'_> {
        if self.loading {
            return ViewState::Loading;
        }
        if let Some(message) = self.error.as_deref() {
            return ViewState::Error(message);
        }
        match self.todos.as_deref() {
            None | Some([]) => ViewState::Empty,
            Some(todos) => ViewState::Populated(todos),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.as_deref().unwrap_or_default()
    }

    /// Recomputed from the cached collection on every call.
    pub fn stats(&self) -> Stats {
        Stats::from_todos(self.todos())
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state(), ViewState::Error(_))
    }

    /// Fetch the collection and replace the cache.
    pub fn load(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let request = self.client.build_list_todos();
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_list_todos(response));
        self.loading = false;

        match result {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "todos loaded");
                self.todos = Some(todos);
                self.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail("Failed to load todos", err)),
        }
    }

    pub fn add(&mut self, title: &str) -> Result<Todo, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
        };
        let result = self
            .client
            .build_create_todo(&input)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_create_todo(response));
        match result {
            Ok(todo) => {
                self.refetch()?;
                Ok(todo)
            }
            Err(err) => Err(self.fail("Failed to add todo", err)),
        }
    }

    pub fn toggle(&mut self, id: u64) -> Result<Todo, ApiError> {
        let request = self.client.build_toggle_todo(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_toggle_todo(response));
        match result {
            Ok(todo) => {
                self.refetch()?;
                Ok(todo)
            }
            Err(err) => Err(self.fail("Failed to update todo", err)),
        }
    }

    pub fn delete(&mut self, id: u64) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_delete_todo(response));
        match result {
            Ok(()) => self.refetch(),
            Err(err) => Err(self.fail("Failed to delete todo", err)),
        }
    }

    /// Drop the cached collection and fetch it again.
    fn refetch(&mut self) -> Result<(), ApiError> {
        self.todos = None;
        self.load()
    }

    fn fail(&mut self, action: &str, err: ApiError) -> ApiError {
        let message = format!("{action}: {err}");
        tracing::warn!(%message, "request failed");
        // A failed request ends loading even if no list was ever fetched.
        self.loading = false;
        self.error = Some(message);
        err
    }

    /// Text rendering of the current state.
    pub fn render(&self) -> String {
        match self.state() {
            ViewState::Loading => "Loading...".to_string(),
            ViewState::Error(message) => format!("Error: {message}"),
            ViewState::Empty => "No todos yet".to_string(),
            ViewState::Populated(todos) => {
                let mut out = String::new();
                for todo in todos {
                    let mark = if todo.completed { 'x' } else { ' ' };
                    out.push_str(&format!("[{mark}] {}. {}\n", todo.id, todo.title));
                }
                out.push_str(&Stats::from_todos(todos).to_string());
                out
            }
        }
    }
}
