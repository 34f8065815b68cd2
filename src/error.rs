//! Error Types
//!
//! Validation failures stay on the client; transport and channel failures are
//! reported to the user once, per operation.

use thiserror::Error;

pub type TodoResult<T> = Result<T, TodoError>;

/// Input rejected before reaching any backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("text is empty")]
    EmptyText,
    #[error("no todo is being edited")]
    NoEditSession,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TodoError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Request failed, backend unreachable, or non-success status
    #[error("transport error: {reason}")]
    Transport {
        status: Option<u16>,
        /// Backend-supplied message, shown to the user when present
        detail: Option<String>,
        reason: String,
    },

    /// Realtime subscription dropped or was cancelled
    #[error("channel error: {0}")]
    Channel(String),
}

impl TodoError {
    pub fn transport(reason: impl Into<String>) -> Self {
        TodoError::Transport {
            status: None,
            detail: None,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Text of the blocking notification for a failed `op`
    pub fn notification(&self, op: Operation) -> String {
        match self {
            TodoError::Transport { detail: Some(detail), .. } => {
                format!("{}\n\n{}", op.failure_message(), detail)
            }
            _ => op.failure_message().to_string(),
        }
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(e: reqwest::Error) -> Self {
        TodoError::Transport {
            status: e.status().map(|s| s.as_u16()),
            detail: None,
            reason: e.to_string(),
        }
    }
}

/// User-facing operations, used to pick the failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Toggle,
    Delete,
    Edit,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Load => "Could not load the todo list. Please reload the page.",
            Operation::Add => "Failed to add the todo. Please try again.",
            Operation::Toggle => "Failed to update the todo status. Please try again.",
            Operation::Delete => "Failed to delete the todo. Please try again.",
            Operation::Edit => "Failed to save your changes. Please try again.",
        }
    }
}
