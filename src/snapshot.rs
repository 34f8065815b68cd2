//! Realtime Snapshot
//!
//! The realtime database streams changes as Server-Sent Events:
//!
//! ```text
//! event: put
//! data: {"path": "/-Nx1/completed", "data": true}
//! ```
//!
//! `put` replaces the node at `path`, `patch` merges children into it. The
//! collection is mirrored as a JSON tree so that every event can be turned back
//! into a full snapshot of the list.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{TodoError, TodoResult};
use crate::list::sort_newest_first;
use crate::models::{RealtimeRecord, Todo};

#[derive(Debug, Deserialize)]
struct StreamPayload {
    path: String,
    #[serde(default)]
    data: Value,
}

/// One decoded event of the subscription stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Map<String, Value> },
    KeepAlive,
    /// Server closed the stream (`cancel` / `auth_revoked`)
    Closed(String),
}

impl StreamEvent {
    /// Decode an event from its SSE type and `data:` payload
    pub fn parse(event_type: &str, payload: &str) -> TodoResult<Self> {
        match event_type {
            "put" | "patch" => {
                let StreamPayload { path, data } = serde_json::from_str(payload)
                    .map_err(|e| TodoError::Channel(format!("malformed {} event: {}", event_type, e)))?;
                if event_type == "put" {
                    return Ok(StreamEvent::Put { path, data });
                }
                match data {
                    Value::Object(map) => Ok(StreamEvent::Patch { path, data: map }),
                    other => Err(TodoError::Channel(format!("patch data is not an object: {}", other))),
                }
            }
            "keep-alive" => Ok(StreamEvent::KeepAlive),
            "cancel" | "auth_revoked" => Ok(StreamEvent::Closed(format!("{}: {}", event_type, payload))),
            other => Err(TodoError::Channel(format!("unknown stream event: {}", other))),
        }
    }
}

/// Client-side mirror of the `todos` collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotTree {
    root: Value,
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self { root: Value::Null }
    }

    /// Apply an event. Returns `true` when the collection may have changed.
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Put { path, data } => {
                self.put(&path, data);
                true
            }
            StreamEvent::Patch { path, data } => {
                self.patch(&path, data);
                true
            }
            StreamEvent::KeepAlive | StreamEvent::Closed(_) => false,
        }
    }

    /// Replace the node at `path`; `null` deletes it
    pub fn put(&mut self, path: &str, data: Value) {
        let segments = split_path(path);
        set_at(&mut self.root, &segments, data);
    }

    /// Put each child of `data` under `path`
    pub fn patch(&mut self, path: &str, data: Map<String, Value>) {
        let base = split_path(path);
        for (key, value) in data {
            let mut segments = base.clone();
            segments.extend(split_path(&key));
            set_at(&mut self.root, &segments, value);
        }
    }


    /// Keyed mapping → ordered list, newest first
    pub fn todos(&self) -> Vec<Todo> {
        let Value::Object(entries) = &self.root else {
            return Vec::new();
        };
        let mut todos: Vec<Todo> = entries
            .iter()
            .filter_map(|(id, value)| match serde_json::from_value::<RealtimeRecord>(value.clone()) {
                Ok(record) => Some(record.into_todo(id)),
                Err(e) => {
                    log::warn!("skipping malformed todo {}: {}", id, e);
                    None
                }
            })
            .collect();
        sort_newest_first(&mut todos);
        todos
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn set_at(node: &mut Value, segments: &[&str], data: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = if is_empty_node(&data) { Value::Null } else { data };
        return;
    };

    if !node.is_object() {
        if data.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else {
        return;
    };

    let child = map.entry(head.to_string()).or_insert(Value::Null);
    set_at(child, rest, data);
    let prune = is_empty_node(child);
    if prune {
        map.remove(*head);
    }

    let now_empty = map.is_empty();
    if now_empty {
        *node = Value::Null;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    fn seeded() -> SnapshotTree {
        let mut tree = SnapshotTree::new();
        tree.put(
            "/",
            json!({
                "-A": {"text": "first", "completed": false, "createdAt": "2024-05-01T08:00:00.000Z"},
                "-B": {"text": "second", "completed": true, "createdAt": "2024-05-01T09:00:00.000Z"}
            }),
        );
        tree
    }

    #[test]
    fn test_parse_put() {
        let event = StreamEvent::parse("put", r#"{"path":"/-A","data":{"text":"x"}}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Put { path: "/-A".into(), data: json!({"text": "x"}) }
        );
    }

    #[test]
    fn test_parse_other_events() {
        assert_eq!(StreamEvent::parse("keep-alive", "null").unwrap(), StreamEvent::KeepAlive);
        assert!(matches!(
            StreamEvent::parse("cancel", "null").unwrap(),
            StreamEvent::Closed(_)
        ));
        assert!(StreamEvent::parse("put", "{not json").is_err());
        assert!(StreamEvent::parse("patch", r#"{"path":"/","data":3}"#).is_err());
        assert!(StreamEvent::parse("rumble", "").is_err());
    }

    #[test]
    fn test_full_put_sorted_newest_first() {
        let todos = seeded().todos();
        assert_eq!(ids(&todos), vec!["-B", "-A"]);
        assert!(todos[0].completed);
    }

    #[test]
    fn test_empty_collection() {
        let mut tree = SnapshotTree::new();
        assert!(tree.todos().is_empty());
        tree.put("/", Value::Null);
        assert!(tree.todos().is_empty());
    }

    #[test]
    fn test_nested_put_updates_field() {
        let mut tree = seeded();
        tree.put("/-A/completed", json!(true));
        let todos = tree.todos();
        assert!(todos.iter().all(|t| t.completed));
        assert_eq!(todos[1].text, "first");
    }

    #[test]
    fn test_put_null_deletes_and_prunes() {
        let mut tree = seeded();
        tree.put("/-A", Value::Null);
        assert_eq!(ids(&tree.todos()), vec!["-B"]);

        tree.put("/-B", Value::Null);
        assert!(tree.root.is_null());
        assert!(tree.todos().is_empty());
    }

    #[test]
    fn test_patch_merges_children() {
        let mut tree = seeded();
        let data = json!({"text": "renamed"}).as_object().cloned().unwrap();
        tree.apply(StreamEvent::Patch { path: "/-B".into(), data });

        let todos = tree.todos();
        let b = todos.iter().find(|t| t.id == "-B").unwrap();
        assert_eq!(b.text, "renamed");
        assert!(b.completed);
    }

    #[test]
    fn test_patch_at_root_adds_entry() {
        let mut tree = seeded();
        let data = json!({
            "-C": {"text": "third", "completed": false, "createdAt": "2024-05-01T10:00:00.000Z"}
        })
        .as_object()
        .cloned()
        .unwrap();
        tree.patch("/", data);
        assert_eq!(ids(&tree.todos()), vec!["-C", "-B", "-A"]);
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let mut tree = seeded();
        tree.put("/-bad", json!({"completed": true}));
        assert_eq!(tree.todos().len(), 2);
    }

    #[test]
    fn test_keep_alive_changes_nothing() {
        let mut tree = seeded();
        let before = tree.clone();
        assert!(!tree.apply(StreamEvent::KeepAlive));
        assert_eq!(tree, before);
    }
}
