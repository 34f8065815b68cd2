//! UI Components
//!
//! Leptos components for the todo page.

mod new_todo_form;
mod todo_list;
mod todo_row;
mod stats_bar;
mod edit_modal;

pub use new_todo_form::NewTodoForm;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
pub use stats_bar::{AnimatedCounter, StatsBar};
pub use edit_modal::EditModal;

/// Enter submits, except while an IME composition is being committed
pub(crate) fn is_submit_key(ev: &web_sys::KeyboardEvent) -> bool {
    submits(&ev.key(), ev.is_composing())
}

fn submits(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}
