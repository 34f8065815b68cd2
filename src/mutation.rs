//! Mutation Adapter
//!
//! add / toggle / delete / edit against whichever backend is connected. Every
//! operation resolves to one `MutationResult`; the UI settles them all the same way.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::commands::TodoBackend;
use crate::error::{TodoResult, ValidationError};
use crate::list::{self, ListPatch};
use crate::models::{NewTodo, Todo};

pub type MutationResult = TodoResult<Option<ListPatch>>;

/// Trimmed text, or `EmptyText`
pub fn validate_text(text: &str) -> TodoResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText.into());
    }
    Ok(trimmed)
}

#[derive(Clone)]
pub struct MutationAdapter {
    backend: Rc<dyn TodoBackend>,
}

impl MutationAdapter {
    pub fn new(backend: Rc<dyn TodoBackend>) -> Self {
        Self { backend }
    }

    pub async fn add(&self, text: &str) -> MutationResult {
        self.add_at(text, Utc::now()).await
    }

    pub async fn add_at(&self, text: &str, created_at: DateTime<Utc>) -> MutationResult {
        let text = validate_text(text)?;
        log::info!("adding todo");
        self.backend.create(&NewTodo::new(text, created_at)).await
    }

    /// Flip `completed`. Unknown ids are a no-op; nothing flips before the backend confirms.
    pub async fn toggle(&self, todos: &[Todo], id: &str) -> MutationResult {
        let Some(todo) = list::find(todos, id) else {
            log::debug!("toggle of unknown todo {}", id);
            return Ok(None);
        };
        log::info!("toggling todo {}", id);
        self.backend.set_completed(todo, !todo.completed).await
    }

    pub async fn delete(&self, id: &str) -> MutationResult {
        log::info!("deleting todo {}", id);
        self.backend.delete(id).await
    }

    /// Replace the text of the todo being edited
    pub async fn edit(&self, todos: &[Todo], editing: Option<&str>, text: &str) -> MutationResult {
        let text = validate_text(text)?;
        let id = editing.ok_or(ValidationError::NoEditSession)?;
        let todo = list::find(todos, id).ok_or(ValidationError::NoEditSession)?;
        log::info!("editing todo {}", id);
        self.backend.set_text(todo, text).await
    }
}
