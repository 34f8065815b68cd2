//! Todo Row Component
//!
//! One list entry: checkbox, text, edit and delete controls.

use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::{DELETE_TRANSITION_MS, ROW_STAGGER_SECS};
use crate::context::AppContext;
use crate::error::Operation;
use crate::models::Todo;
use crate::notify::settle;
use crate::store::{store_open_edit, AppStateStoreFields};

/// A single todo row in the list
#[component]
pub fn TodoRow(todo: Todo, index: usize) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let Todo { id, text, completed, .. } = todo;
    let removing = RwSignal::new(false);
    let checkbox_ref: NodeRef<html::Input> = NodeRef::new();

    let toggle_id = id.clone();
    let on_toggle = move |_: web_sys::Event| {
        let id = toggle_id.clone();
        spawn_local(async move {
            let todos = ctx.store.todos().get_untracked();
            let result = ctx.adapter().toggle(&todos, &id).await;
            if !settle(ctx.store, Operation::Toggle, result, None) {
                // Show the last confirmed state again
                if let Some(checkbox) = checkbox_ref.try_get_untracked().flatten() {
                    checkbox.set_checked(completed);
                }
            }
        });
    };

    let edit_id = id.clone();
    let on_edit = move |_: web_sys::MouseEvent| {
        if !store_open_edit(&ctx.store, &edit_id) {
            log::debug!("todo {} vanished before editing", edit_id);
        }
    };

    let delete_id = id.clone();
    let on_delete = move |_: web_sys::MouseEvent| {
        let id = delete_id.clone();
        removing.set(true);
        spawn_local(async move {
            TimeoutFuture::new(DELETE_TRANSITION_MS).await;
            let result = ctx.adapter().delete(&id).await;
            if !settle(ctx.store, Operation::Delete, result, None) {
                let _ = removing.try_set(false);
            }
        });
    };

    let row_class = move || {
        let mut c = String::from("todo-item");
        if completed { c.push_str(" completed"); }
        if removing.get() { c.push_str(" removing"); }
        c
    };

    view! {
        <li
            class=row_class
            data-id=id
            style=format!("animation-delay: {:.2}s;", index as f64 * ROW_STAGGER_SECS)
        >
            <label class="checkbox-wrapper">
                <input
                    node_ref=checkbox_ref
                    type="checkbox"
                    class="checkbox"
                    prop:checked=completed
                    on:change=on_toggle
                />
                <span class="checkmark"></span>
            </label>

            // Rendered as a text node, never as markup
            <span class="todo-text">{text}</span>

            <div class="todo-actions">
                <button class="action-btn edit-btn" title="Edit" on:click=on_edit>"✏️"</button>
                <button class="action-btn delete-btn" title="Delete" on:click=on_delete>"🗑️"</button>
            </div>
        </li>
    }
}
