//! Realtime Database Backend
//!
//! Writes go through the database's REST surface; reads only ever arrive
//! through the streaming subscription, one full snapshot per change.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use serde_json::json;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use super::{encode_segment, ensure_success, BackendResult, TodoBackend};
use crate::config::COLLECTION;
use crate::error::{TodoError, TodoResult};
use crate::feed::FeedEvent;
use crate::models::{NewTodo, PushResponse, RealtimeDraft, Todo};
use crate::snapshot::{SnapshotTree, StreamEvent};

/// Event types the stream can emit
const STREAM_EVENTS: [&str; 5] = ["put", "patch", "keep-alive", "cancel", "auth_revoked"];

pub struct RealtimeBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RealtimeBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, COLLECTION)
    }

    pub fn entry_url(&self, id: &str) -> String {
        format!("{}/{}/{}.json", self.base_url, COLLECTION, encode_segment(id))
    }

    /// Open the one long-lived subscription to the whole collection
    pub fn subscribe(&self, feed: UnboundedSender<FeedEvent>) -> TodoResult<EventSource> {
        let source = EventSource::new(&self.collection_url())
            .map_err(|e| TodoError::Channel(format!("EventSource rejected: {:?}", e)))?;
        let tree = Rc::new(RefCell::new(SnapshotTree::new()));

        for event_type in STREAM_EVENTS {
            let tree = tree.clone();
            let feed = feed.clone();
            let on_event = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let payload = ev.data().as_string().unwrap_or_default();
                handle_stream_event(&tree, &feed, event_type, &payload);
            });
            source
                .add_event_listener_with_callback(event_type, on_event.as_ref().unchecked_ref())
                .map_err(|e| TodoError::Channel(format!("listener for {}: {:?}", event_type, e)))?;
            on_event.forget();
        }

        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            let _ = feed.unbounded_send(FeedEvent::Failed(TodoError::Channel(
                "subscription connection error".to_string(),
            )));
        });
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        log::info!("subscribed to {}", self.collection_url());
        Ok(source)
    }
}

/// Apply one stream event and forward the resulting snapshot
pub(crate) fn handle_stream_event(
    tree: &RefCell<SnapshotTree>,
    feed: &UnboundedSender<FeedEvent>,
    event_type: &str,
    payload: &str,
) {
    match StreamEvent::parse(event_type, payload) {
        Ok(StreamEvent::Closed(reason)) => {
            let _ = feed.unbounded_send(FeedEvent::Failed(TodoError::Channel(reason)));
        }
        Ok(event) => {
            let changed = tree.borrow_mut().apply(event);
            if changed {
                let todos = tree.borrow().todos();
                log::debug!("snapshot with {} todos", todos.len());
                let _ = feed.unbounded_send(FeedEvent::Snapshot(todos));
            }
        }
        Err(e) => log::warn!("ignoring stream event: {}", e),
    }
}

#[async_trait(?Send)]
impl TodoBackend for RealtimeBackend {
    async fn create(&self, draft: &NewTodo) -> BackendResult {
        let resp = self
            .client
            .post(self.collection_url())
            .json(&RealtimeDraft::from(draft))
            .send()
            .await?;
        let pushed: PushResponse = ensure_success(resp).await?.json().await?;
        log::info!("created todo {}", pushed.name);
        Ok(None)
    }

    async fn set_completed(&self, todo: &Todo, completed: bool) -> BackendResult {
        let resp = self
            .client
            .patch(self.entry_url(&todo.id))
            .json(&json!({ "completed": completed }))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(None)
    }

    async fn set_text(&self, todo: &Todo, text: &str) -> BackendResult {
        let resp = self
            .client
            .patch(self.entry_url(&todo.id))
            .json(&json!({ "text": text }))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(None)
    }

    async fn delete(&self, id: &str) -> BackendResult {
        let resp = self.client.delete(self.entry_url(id)).send().await?;
        ensure_success(resp).await?;
        Ok(None)
    }
}
