//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The list and the
//! edit session only change through the helpers below.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::error::TodoResult;
use crate::list::{self, ListPatch};
use crate::models::{Todo, TodoId};
use crate::mutation::MutationAdapter;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current list, in display order
    pub todos: Vec<Todo>,
    /// Todo open in the edit modal (at most one)
    pub editing_id: Option<TodoId>,
    /// Text in the edit field
    pub edit_draft: String,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Replace the whole list with a fresh snapshot
pub fn store_replace_todos(store: &AppStore, todos: Vec<Todo>) {
    store.todos().set(todos);
}

/// Merge a backend-confirmed change
pub fn store_apply_patch(store: &AppStore, patch: ListPatch) {
    list::apply_patch(&mut store.todos().write(), patch);
}

pub fn store_find_todo(store: &AppStore, id: &str) -> Option<Todo> {
    list::find(&store.todos().read_untracked(), id).cloned()
}

/// Start editing `id`. Returns `false` if there is no such todo.
pub fn store_open_edit(store: &AppStore, id: &str) -> bool {
    let Some(todo) = store_find_todo(store, id) else {
        return false;
    };
    store.edit_draft().set(todo.text);
    store.editing_id().set(Some(todo.id));
    true
}

/// End the edit session and clear the field
pub fn store_close_edit(store: &AppStore) {
    store.editing_id().set(None);
    store.edit_draft().set(String::new());
}

/// Save the edit field for the open session. The session closes only when the
/// backend accepted the change; on error the id and draft stay as they were.
pub async fn store_save_edit(store: &AppStore, adapter: &MutationAdapter) -> TodoResult<()> {
    let todos = store.todos().get_untracked();
    let editing = store.editing_id().get_untracked();
    let draft = store.edit_draft().get_untracked();

    if let Some(patch) = adapter.edit(&todos, editing.as_deref(), &draft).await? {
        store_apply_patch(store, patch);
    }
    store_close_edit(store);
    Ok(())
}
