//! REST Backend
//!
//! Plain request/response CRUD on `/todos`. Every successful write returns the
//! confirmed representation, which the caller merges into the local list.

use async_trait::async_trait;

use super::{encode_segment, ensure_success, BackendResult, TodoBackend};
use crate::config::COLLECTION;
use crate::error::TodoResult;
use crate::list::ListPatch;
use crate::models::{NewTodo, RestCreateBody, RestRecord, RestUpdateBody, Todo};

pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, COLLECTION)
    }

    pub fn entry_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, COLLECTION, encode_segment(id))
    }

    /// `GET /todos`, in backend order
    pub async fn list(&self) -> TodoResult<Vec<Todo>> {
        let resp = self.client.get(self.collection_url()).send().await?;
        let records: Vec<RestRecord> = ensure_success(resp).await?.json().await?;
        Ok(records.into_iter().map(Todo::from).collect())
    }

    async fn put(&self, id: &str, body: &RestUpdateBody<'_>) -> BackendResult {
        let resp = self.client.put(self.entry_url(id)).json(body).send().await?;
        let record: RestRecord = ensure_success(resp).await?.json().await?;
        Ok(Some(ListPatch::Updated(record.into())))
    }
}

#[async_trait(?Send)]
impl TodoBackend for RestBackend {
    async fn create(&self, draft: &NewTodo) -> BackendResult {
        let resp = self
            .client
            .post(self.collection_url())
            .json(&RestCreateBody { title: &draft.text })
            .send()
            .await?;
        let record: RestRecord = ensure_success(resp).await?.json().await?;
        log::info!("created todo {}", record.id);
        Ok(Some(ListPatch::Created(record.into())))
    }

    async fn set_completed(&self, todo: &Todo, completed: bool) -> BackendResult {
        self.put(&todo.id, &RestUpdateBody { title: &todo.text, completed }).await
    }

    async fn set_text(&self, todo: &Todo, text: &str) -> BackendResult {
        self.put(&todo.id, &RestUpdateBody { title: text, completed: todo.completed }).await
    }

    async fn delete(&self, id: &str) -> BackendResult {
        let resp = self.client.delete(self.entry_url(id)).send().await?;
        ensure_success(resp).await?;
        Ok(Some(ListPatch::Removed(id.to_string())))
    }
}
