//! Backend Bindings
//!
//! Frontend bindings to the two persistence backends, behind one trait.

mod cache;
mod realtime;
mod rest;

use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver};
use leptos::task::spawn_local;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::{AppConfig, BackendVariant};
use crate::error::{TodoError, TodoResult};
use crate::feed::FeedEvent;
use crate::list::ListPatch;
use crate::models::{NewTodo, RestErrorBody, Todo};
use crate::mutation::MutationAdapter;

pub use cache::{decode_snapshot, LocalStorageCache, SnapshotCache};
pub use realtime::RealtimeBackend;
pub use rest::RestBackend;

/// `None`: nothing to merge locally, the push channel will deliver the change.
/// `Some(patch)`: the backend's confirmed representation.
pub type BackendResult = TodoResult<Option<ListPatch>>;

/// The four writes every backend supports
#[async_trait(?Send)]
pub trait TodoBackend {
    async fn create(&self, draft: &NewTodo) -> BackendResult;

    async fn set_completed(&self, todo: &Todo, completed: bool) -> BackendResult;

    async fn set_text(&self, todo: &Todo, text: &str) -> BackendResult;

    async fn delete(&self, id: &str) -> BackendResult;
}

/// Characters escaped in a single URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode an id so it stays one path segment
pub fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Turn a non-2xx response into `TodoError::Transport`, keeping the `{message}` body
pub(crate) async fn ensure_success(resp: reqwest::Response) -> TodoResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let detail = resp.json::<RestErrorBody>().await.ok().map(|body| body.message);
    Err(TodoError::Transport {
        status: Some(status.as_u16()),
        detail,
        reason: format!("{} returned {}", url, status),
    })
}

/// Everything the UI needs from the persistence side
pub struct Connection {
    pub adapter: MutationAdapter,
    /// One-directional stream of snapshots and channel failures
    pub feed: UnboundedReceiver<FeedEvent>,
    /// Open subscription (realtime only); closing it ends the push channel
    pub keep_alive: Option<web_sys::EventSource>,
}

/// Build the configured backend and start its feed
pub fn connect(config: &AppConfig) -> Connection {
    let (tx, rx) = mpsc::unbounded();

    match config.variant {
        BackendVariant::Realtime => {
            let backend = RealtimeBackend::new(&config.realtime_url);
            let keep_alive = match backend.subscribe(tx.clone()) {
                Ok(source) => Some(source),
                Err(e) => {
                    log::error!("could not open subscription: {}", e);
                    let _ = tx.unbounded_send(FeedEvent::Failed(e));
                    None
                }
            };
            Connection {
                adapter: MutationAdapter::new(Rc::new(backend)),
                feed: rx,
                keep_alive,
            }
        }
        BackendVariant::Rest => {
            let backend = Rc::new(RestBackend::new(&config.rest_url));
            let loader = backend.clone();
            spawn_local(async move {
                let event = match loader.list().await {
                    Ok(todos) => {
                        log::info!("loaded {} todos", todos.len());
                        FeedEvent::Snapshot(todos)
                    }
                    Err(e) => FeedEvent::Failed(e),
                };
                let _ = tx.unbounded_send(event);
            });
            Connection {
                adapter: MutationAdapter::new(backend),
                feed: rx,
                keep_alive: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("-NxYz_12"), "-NxYz_12");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("x?y#z"), "x%3Fy%23z");
    }
}
