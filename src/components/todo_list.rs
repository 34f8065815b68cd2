//! Todo List Component
//!
//! Rebuilds every row from the current list on each change.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;

    let is_empty = move || store.todos().read().is_empty();

    view! {
        <div class=move || if is_empty() { "empty-state" } else { "empty-state hidden" }>
            <div class="empty-icon">"📝"</div>
            <p>"Nothing to do yet. Add your first todo!"</p>
        </div>

        <ul class=move || if is_empty() { "todo-list hidden" } else { "todo-list" }>
            {move || {
                store
                    .todos()
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, todo)| view! { <TodoRow todo=todo index=index /> })
                    .collect_view()
            }}
        </ul>
    }
}
