//! Test Doubles
//!
//! In-memory backends behaving like the two real ones, plus a memory cache.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::commands::{BackendResult, SnapshotCache, TodoBackend};
use crate::error::TodoError;
use crate::list::ListPatch;
use crate::models::{NewTodo, RealtimeDraft, Todo};
use crate::snapshot::SnapshotTree;

pub fn todo(id: &str, completed: bool) -> Todo {
    Todo {
        id: id.to_string(),
        text: format!("Todo {}", id),
        completed,
        created_at: None,
    }
}

fn unreachable_backend() -> TodoError {
    TodoError::Transport {
        status: Some(503),
        detail: Some("Service unavailable".into()),
        reason: "fake backend is failing".into(),
    }
}

/// Behaves like the REST API: returns the stored representation
#[derive(Default)]
pub struct FakeRest {
    rows: RefCell<Vec<Todo>>,
    next_id: Cell<u32>,
    failing: Cell<bool>,
    calls: Cell<usize>,
}

impl FakeRest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Todo>) -> Self {
        let fake = Self::default();
        *fake.rows.borrow_mut() = rows;
        fake
    }

    pub fn rows(&self) -> Vec<Todo> {
        self.rows.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn begin(&self) -> Result<(), TodoError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing.get() {
            return Err(unreachable_backend());
        }
        Ok(())
    }

    fn update(&self, id: &str, change: impl FnOnce(&mut Todo)) -> BackendResult {
        let mut rows = self.rows.borrow_mut();
        let Some(row) = rows.iter_mut().find(|t| t.id == id) else {
            return Err(TodoError::Transport {
                status: Some(404),
                detail: Some("Todo not found".into()),
                reason: format!("no todo {}", id),
            });
        };
        change(row);
        Ok(Some(ListPatch::Updated(row.clone())))
    }
}

#[async_trait(?Send)]
impl TodoBackend for FakeRest {
    async fn create(&self, draft: &NewTodo) -> BackendResult {
        self.begin()?;
        self.next_id.set(self.next_id.get() + 1);
        let created = Todo {
            id: format!("rest-{}", self.next_id.get()),
            text: draft.text.clone(),
            completed: draft.completed,
            created_at: None,
        };
        self.rows.borrow_mut().insert(0, created.clone());
        Ok(Some(ListPatch::Created(created)))
    }

    async fn set_completed(&self, todo: &Todo, completed: bool) -> BackendResult {
        self.begin()?;
        self.update(&todo.id, |row| row.completed = completed)
    }

    async fn set_text(&self, todo: &Todo, text: &str) -> BackendResult {
        self.begin()?;
        self.update(&todo.id, |row| row.text = text.to_string())
    }

    async fn delete(&self, id: &str) -> BackendResult {
        self.begin()?;
        self.rows.borrow_mut().retain(|t| t.id != id);
        Ok(Some(ListPatch::Removed(id.to_string())))
    }
}

/// Behaves like the realtime database: writes land in a tree, nothing comes back
#[derive(Default)]
pub struct FakeRealtime {
    tree: RefCell<SnapshotTree>,
    next_id: Cell<u32>,
    failing: Cell<bool>,
}

impl FakeRealtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// What the subscription would push next
    pub fn snapshot(&self) -> Vec<Todo> {
        self.tree.borrow().todos()
    }

    fn write(&self, path: String, data: Value) -> BackendResult {
        if self.failing.get() {
            return Err(unreachable_backend());
        }
        self.tree.borrow_mut().put(&path, data);
        Ok(None)
    }
}

#[async_trait(?Send)]
impl TodoBackend for FakeRealtime {
    async fn create(&self, draft: &NewTodo) -> BackendResult {
        self.next_id.set(self.next_id.get() + 1);
        let body = serde_json::to_value(RealtimeDraft::from(draft))
            .map_err(|e| TodoError::transport(e.to_string()))?;
        self.write(format!("/-N{:04}", self.next_id.get()), body)
    }

    async fn set_completed(&self, todo: &Todo, completed: bool) -> BackendResult {
        self.write(format!("/{}/completed", todo.id), json!(completed))
    }

    async fn set_text(&self, todo: &Todo, text: &str) -> BackendResult {
        self.write(format!("/{}/text", todo.id), json!(text))
    }

    async fn delete(&self, id: &str) -> BackendResult {
        self.write(format!("/{}", id), Value::Null)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    stored: RefCell<Option<Vec<Todo>>>,
}

impl MemoryCache {
    pub fn with(todos: Vec<Todo>) -> Self {
        Self {
            stored: RefCell::new(Some(todos)),
        }
    }
}

impl SnapshotCache for MemoryCache {
    fn load(&self) -> Option<Vec<Todo>> {
        self.stored.borrow().clone()
    }

    fn save(&self, todos: &[Todo]) {
        *self.stored.borrow_mut() = Some(todos.to_vec());
    }
}
