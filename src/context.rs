//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::mutation::MutationAdapter;
use crate::store::AppStore;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// List and edit session
    pub store: AppStore,
    /// Backend writes; kept local because the adapter is not `Send`
    adapter: StoredValue<MutationAdapter, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore, adapter: MutationAdapter) -> Self {
        Self {
            store,
            adapter: StoredValue::new_local(adapter),
        }
    }

    pub fn adapter(&self) -> MutationAdapter {
        self.adapter.get_value()
    }
}
