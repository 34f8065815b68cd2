//! Snapshot Feed
//!
//! The persistence side pushes events into the core through one channel; the
//! core's only reaction is to replace the list (or report a failure).

use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;

use crate::commands::SnapshotCache;
use crate::config::BackendVariant;
use crate::error::{Operation, TodoError};
use crate::models::Todo;
use crate::notify::report_failure;
use crate::store::{store_replace_todos, AppStore};

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Full current collection
    Snapshot(Vec<Todo>),
    Failed(TodoError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    Replace(Vec<Todo>),
    Notify(Operation, TodoError),
    Ignore,
}

pub struct FeedReducer {
    variant: BackendVariant,
    fallback_used: bool,
}

impl FeedReducer {
    pub fn new(variant: BackendVariant) -> Self {
        Self {
            variant,
            fallback_used: false,
        }
    }

    pub fn reduce(&mut self, event: FeedEvent, cache: &dyn SnapshotCache) -> FeedAction {
        match event {
            FeedEvent::Snapshot(todos) => {
                if self.variant == BackendVariant::Realtime {
                    cache.save(&todos);
                }
                FeedAction::Replace(todos)
            }
            FeedEvent::Failed(TodoError::Channel(reason)) => {
                log::error!("subscription failed: {}", reason);
                // Fallback read happens once per page
                if self.fallback_used {
                    return FeedAction::Ignore;
                }
                self.fallback_used = true;
                match cache.load() {
                    Some(todos) => {
                        log::info!("showing {} cached todos", todos.len());
                        FeedAction::Replace(todos)
                    }
                    None => FeedAction::Ignore,
                }
            }
            FeedEvent::Failed(err) => FeedAction::Notify(Operation::Load, err),
        }
    }
}

/// Consume the feed for the lifetime of the page
pub async fn drive(
    store: AppStore,
    mut feed: UnboundedReceiver<FeedEvent>,
    mut reducer: FeedReducer,
    cache: impl SnapshotCache,
) {
    while let Some(event) = feed.next().await {
        match reducer.reduce(event, &cache) {
            FeedAction::Replace(todos) => store_replace_todos(&store, todos),
            FeedAction::Notify(op, err) => report_failure(op, &err),
            FeedAction::Ignore => {}
        }
    }
    log::info!("feed closed");
}
