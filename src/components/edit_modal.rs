//! Edit Modal Component
//!
//! Shown while an edit session exists. Closes via the × button, Cancel, a click
//! on the backdrop, Escape, or a successful save.

use std::time::Duration;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::EDIT_FOCUS_DELAY_MS;
use crate::context::AppContext;
use crate::error::Operation;
use crate::notify::reject;
use crate::store::{store_close_edit, store_save_edit, AppStateStoreFields};

use super::is_submit_key;

#[component]
pub fn EditModal() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;

    let shaking = RwSignal::new(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let is_open = move || store.editing_id().read().is_some();

    // Focus the field once the reveal transition has settled
    Effect::new(move |_| {
        if is_open() {
            set_timeout(
                move || {
                    if let Some(input) = input_ref.try_get_untracked().flatten() {
                        let _ = input.focus();
                    }
                },
                Duration::from_millis(EDIT_FOCUS_DELAY_MS),
            );
        }
    });

    // Window-level listener, lives as long as the page
    let _escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && store.editing_id().get_untracked().is_some() {
            store_close_edit(&store);
        }
    });

    let close = move || store_close_edit(&store);

    let save = move || {
        spawn_local(async move {
            if let Err(err) = store_save_edit(&store, &ctx.adapter()).await {
                reject(Operation::Edit, &err, Some(shaking));
            }
        });
    };

    view! {
        <div
            class=move || if is_open() { "modal active" } else { "modal" }
            on:click=move |ev: web_sys::MouseEvent| {
                // Only the backdrop itself, not clicks bubbling from the content
                if ev.target() == ev.current_target() {
                    close();
                }
            }
        >
            <div class="modal-content">
                <div class="modal-header">
                    <h2>"Edit todo"</h2>
                    <button class="modal-close" on:click=move |_| close()>"×"</button>
                </div>
                <input
                    node_ref=input_ref
                    type="text"
                    class=move || if shaking.get() { "edit-input shake" } else { "edit-input" }
                    prop:value=move || store.edit_draft().get()
                    on:input=move |ev| store.edit_draft().set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if is_submit_key(&ev) {
                            save();
                        }
                    }
                />
                <div class="modal-actions">
                    <button class="btn-cancel" on:click=move |_| close()>"Cancel"</button>
                    <button class="btn-save" on:click=move |_| save()>"Save"</button>
                </div>
            </div>
        </div>
    }
}
