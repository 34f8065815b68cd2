//! Local Snapshot Cache
//!
//! Last known realtime snapshot in `localStorage`, read once when the
//! subscription fails.

use crate::config::CACHE_KEY;
use crate::models::Todo;

pub trait SnapshotCache {
    fn load(&self) -> Option<Vec<Todo>>;

    fn save(&self, todos: &[Todo]);
}

pub struct LocalStorageCache {
    key: String,
}

impl Default for LocalStorageCache {
    fn default() -> Self {
        Self::new(CACHE_KEY)
    }
}

impl LocalStorageCache {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SnapshotCache for LocalStorageCache {
    fn load(&self) -> Option<Vec<Todo>> {
        let raw = Self::storage()?.get_item(&self.key).ok()??;
        decode_snapshot(&raw)
    }

    fn save(&self, todos: &[Todo]) {
        let Some(storage) = Self::storage() else {
            return;
        };
        match serde_json::to_string(todos) {
            Ok(raw) => {
                if storage.set_item(&self.key, &raw).is_err() {
                    log::warn!("could not write snapshot cache");
                }
            }
            Err(e) => log::warn!("could not encode snapshot cache: {}", e),
        }
    }
}

/// Parse a cached snapshot; a corrupt cache counts as no cache
pub fn decode_snapshot(raw: &str) -> Option<Vec<Todo>> {
    match serde_json::from_str(raw) {
        Ok(todos) => Some(todos),
        Err(e) => {
            log::warn!("discarding corrupt snapshot cache: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_snapshot() {
        let raw = r#"[{"id":"-A","text":"Buy milk","completed":true,"createdAt":"2024-05-01T08:00:00.000Z"}]"#;
        let todos = decode_snapshot(raw).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, "-A");
        assert!(todos[0].completed);
        assert!(todos[0].created_at.is_some());
    }

    #[test]
    fn test_decode_corrupt_snapshot() {
        assert!(decode_snapshot("{oops").is_none());
        assert_eq!(decode_snapshot("[]"), Some(Vec::new()));
    }
}
