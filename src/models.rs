//! Frontend Models
//!
//! The todo entity plus the wire records of both backends.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned identifier, opaque to the client
pub type TodoId = String;

/// Todo data structure shared by both variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Only the realtime variant has one; used for newest-first ordering
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Draft of a todo the user just submitted (no id yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            created_at,
        }
    }
}

// ========================
// Realtime database records
// ========================

/// One entry under `todos/{id}` as the realtime database stores it
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeRecord {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

impl RealtimeRecord {
    /// Tag the record with its key. An unparseable timestamp is dropped, not fatal.
    pub fn into_todo(self, id: &str) -> Todo {
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Todo {
            id: id.to_string(),
            text: self.text,
            completed: self.completed,
            created_at,
        }
    }
}

/// Body written when creating an entry
#[derive(Debug, Serialize)]
pub struct RealtimeDraft<'a> {
    pub text: &'a str,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl<'a> From<&'a NewTodo> for RealtimeDraft<'a> {
    fn from(draft: &'a NewTodo) -> Self {
        Self {
            text: &draft.text,
            completed: draft.completed,
            created_at: draft.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Response of a push (`POST todos.json`): the generated key
#[derive(Debug, Deserialize)]
pub struct PushResponse {
    pub name: String,
}

// ========================
// REST records
// ========================

#[derive(Debug, Clone, Deserialize)]
pub struct RestRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<RestRecord> for Todo {
    fn from(record: RestRecord) -> Self {
        Todo {
            id: record.id,
            text: record.title,
            completed: record.completed,
            created_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestCreateBody<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RestUpdateBody<'a> {
    pub title: &'a str,
    pub completed: bool,
}

/// Error body of a non-2xx REST response
#[derive(Debug, Deserialize)]
pub struct RestErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_realtime_record_into_todo() {
        let record: RealtimeRecord = serde_json::from_str(
            r#"{"text":"Buy milk","completed":true,"createdAt":"2024-03-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        let todo = record.into_todo("-Nabc");

        assert_eq!(todo.id, "-Nabc");
        assert_eq!(todo.text, "Buy milk");
        assert!(todo.completed);
        assert_eq!(todo.created_at, Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_realtime_record_bad_timestamp() {
        let record: RealtimeRecord =
            serde_json::from_str(r#"{"text":"x","createdAt":"yesterday"}"#).unwrap();
        let todo = record.into_todo("k");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, None);
    }

    #[test]
    fn test_realtime_draft_timestamp_format() {
        let draft = NewTodo::new("Walk dog", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let json = serde_json::to_value(RealtimeDraft::from(&draft)).unwrap();
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05.000Z");
        assert_eq!(json["completed"], false);
        assert_eq!(json["text"], "Walk dog");
    }

    #[test]
    fn test_rest_record_into_todo() {
        let record: RestRecord =
            serde_json::from_str(r#"{"_id":"65f0","title":"Read","completed":false,"__v":0}"#).unwrap();
        let todo = Todo::from(record);
        assert_eq!(todo.id, "65f0");
        assert_eq!(todo.text, "Read");
        assert_eq!(todo.created_at, None);
    }

    #[test]
    fn test_cache_format_is_camel_case() {
        let todo = Todo {
            id: "a".into(),
            text: "t".into(),
            completed: false,
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("createdAt").is_some());
        let back: Todo = serde_json::from_value(json).unwrap();
        assert_eq!(back, todo);
    }
}
