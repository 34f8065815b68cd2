//! Blue Todo App
//!
//! Main application component: connects the backend, feeds snapshots into the
//! store, and lays out the page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::{self, Connection, LocalStorageCache};
use crate::components::{EditModal, NewTodoForm, StatsBar, TodoList};
use crate::config::{AppConfig, BackendVariant};
use crate::context::AppContext;
use crate::feed::{self, FeedReducer};
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // State
    let store = Store::new(AppState::default());

    let Connection { adapter, feed: events, keep_alive } = commands::connect(&config);

    // Provide context to all children
    provide_context(AppContext::new(store, adapter));

    // The subscription stays open for the page lifetime
    let _subscription = StoredValue::new_local(keep_alive);

    spawn_local(feed::drive(
        store,
        events,
        FeedReducer::new(config.variant),
        LocalStorageCache::default(),
    ));

    let subtitle = match config.variant {
        BackendVariant::Realtime => "Synced live across every open tab",
        BackendVariant::Rest => "Saved to the server on every change",
    };

    view! {
        <div class="container">
            <header class="header">
                <h1>"Blue Todo"</h1>
                <p class="subtitle">{subtitle}</p>
            </header>

            <NewTodoForm />

            <StatsBar />

            <TodoList />
        </div>

        <EditModal />
    }
}
