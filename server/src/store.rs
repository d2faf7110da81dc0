//! In-memory todo store.
//!
//! # Design
//! `TodoStore` is an explicit value owned by the router state, never a
//! module-level global. Todos live in a `Vec` so insertion order is the list
//! order. Ids come from `next_id`, which only ever increments: a deleted id is
//! gone for the lifetime of the store.

use chrono::Utc;
use thiserror::Error;

use crate::model::Todo;

/// Failures of store operations. Mapped to HTTP statuses in `error.rs`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Todo not found")]
    NotFound(u64),
}

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: u64) -> Result<&Todo, StoreError> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Append a new open todo. The title is stored trimmed.
    pub fn create(&mut self, title: &str) -> Result<Todo, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let todo = Todo {
            id: self.next_id,
            title: title.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// Flip `completed` in place and return the updated todo.
    pub fn toggle(&mut self, id: u64) -> Result<Todo, StoreError> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        todo.completed = !todo.completed;
        Ok(todo.clone())
    }

    pub fn remove(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.todos.remove(index);
        Ok(())
    }
}
