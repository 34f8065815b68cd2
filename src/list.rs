//! List Utilities
//!
//! Pure helpers that keep the local todo list in step with the backend.

use crate::models::{Todo, TodoId};

/// Confirmed change to merge into the local list
#[derive(Debug, Clone, PartialEq)]
pub enum ListPatch {
    /// New todo, shown at the top
    Created(Todo),
    /// Replaces the todo with the same id
    Updated(Todo),
    Removed(TodoId),
}

/// Merge one confirmed change. Items not named by the patch keep order and fields.
pub fn apply_patch(todos: &mut Vec<Todo>, patch: ListPatch) {
    match patch {
        ListPatch::Created(todo) => {
            if let Some(existing) = todos.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo;
            } else {
                todos.insert(0, todo);
            }
        }
        ListPatch::Updated(todo) => {
            if let Some(existing) = todos.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo;
            }
        }
        ListPatch::Removed(id) => todos.retain(|t| t.id != id),
    }
}

pub fn find<'a>(todos: &'a [Todo], id: &str) -> Option<&'a Todo> {
    todos.iter().find(|t| t.id == id)
}

/// Newest first by `created_at`; undated todos go last in their current order
pub fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Counter values shown under the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TodoStats {
    pub fn of(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_todo(id: &str, completed: bool, minute: Option<u32>) -> Todo {
        Todo {
            id: id.to_string(),
            text: format!("Todo {}", id),
            completed,
            created_at: minute.map(|m| Utc.with_ymd_and_hms(2024, 5, 1, 12, m, 0).unwrap()),
        }
    }

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_created_goes_first() {
        let mut todos = vec![make_todo("a", false, None), make_todo("b", false, None)];
        apply_patch(&mut todos, ListPatch::Created(make_todo("c", false, None)));
        assert_eq!(ids(&todos), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_created_twice_does_not_duplicate() {
        let mut todos = vec![make_todo("a", false, None)];
        let mut again = make_todo("a", false, None);
        again.text = "renamed".into();
        apply_patch(&mut todos, ListPatch::Created(again));
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "renamed");
    }

    #[test]
    fn test_updated_replaces_only_that_todo() {
        let mut todos = vec![make_todo("a", false, None), make_todo("b", false, None)];
        let mut b = todos[1].clone();
        b.completed = true;
        apply_patch(&mut todos, ListPatch::Updated(b));

        assert_eq!(ids(&todos), vec!["a", "b"]);
        assert!(!todos[0].completed);
        assert!(todos[1].completed);
    }

    #[test]
    fn test_updated_unknown_is_ignored() {
        let mut todos = vec![make_todo("a", false, None)];
        apply_patch(&mut todos, ListPatch::Updated(make_todo("zz", true, None)));
        assert_eq!(todos, vec![make_todo("a", false, None)]);
    }

    #[test]
    fn test_removed_keeps_others_in_order() {
        let mut todos = vec![
            make_todo("a", false, None),
            make_todo("b", true, None),
            make_todo("c", false, None),
        ];
        apply_patch(&mut todos, ListPatch::Removed("b".into()));
        assert_eq!(ids(&todos), vec!["a", "c"]);
        assert!(find(&todos, "b").is_none());
    }

    #[test]
    fn test_sort_newest_first() {
        let mut todos = vec![
            make_todo("old", false, Some(1)),
            make_todo("undated1", false, None),
            make_todo("new", false, Some(30)),
            make_todo("undated2", false, None),
            make_todo("mid", false, Some(10)),
        ];
        sort_newest_first(&mut todos);
        assert_eq!(ids(&todos), vec!["new", "mid", "old", "undated1", "undated2"]);
    }

    #[test]
    fn test_stats() {
        assert_eq!(TodoStats::of(&[]), TodoStats::default());

        let todos = vec![
            make_todo("a", true, None),
            make_todo("b", false, None),
            make_todo("c", true, None),
        ];
        let stats = TodoStats::of(&todos);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, stats.total - stats.completed);
    }
}
