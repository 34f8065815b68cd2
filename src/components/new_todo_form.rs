//! New Todo Form Component
//!
//! Text input plus add button.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::error::Operation;
use crate::mutation::validate_text;
use crate::notify::{settle, shake};

use super::is_submit_key;

/// Form for creating new todos
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (new_text, set_new_text) = signal(String::new());
    // Add control is disabled while a submission is in flight
    let submitting = RwSignal::new(false);
    let shaking = RwSignal::new(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let focus_input = move || {
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    let add_todo = move || {
        if submitting.get_untracked() {
            return;
        }
        let text = new_text.get_untracked();
        if validate_text(&text).is_err() {
            shake(shaking);
            focus_input();
            return;
        }

        submitting.set(true);
        spawn_local(async move {
            let result = ctx.adapter().add(&text).await;
            submitting.set(false);
            if settle(ctx.store, Operation::Add, result, Some(shaking)) {
                set_new_text.set(String::new());
                focus_input();
            }
        });
    };

    view! {
        <div class=move || if shaking.get() { "input-section shake" } else { "input-section" }>
            <input
                node_ref=input_ref
                type="text"
                class="todo-input"
                placeholder="What needs to be done?"
                prop:value=move || new_text.get()
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if is_submit_key(&ev) {
                        add_todo();
                    }
                }
            />
            <button
                class="add-btn"
                disabled=move || submitting.get()
                on:click=move |_| add_todo()
            >
                "Add"
            </button>
        </div>
    }
}
