//! Domain types for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `TodoId` is an opaque, server-assigned key. The client only ever copies
//! ids it received from the server; it never constructs one on its own.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest title the service accepts, counted in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Server-assigned identifier of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item as confirmed by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request body for `POST /todos` and `PUT /todos/{id}`.
///
/// Updates always send the full representation; the server replaces the
/// stored record with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPayload {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl From<&Todo> for TodoPayload {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            completed: todo.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("title must not be empty")]
    Empty,

    #[error("title is {len} characters, at most {max} are allowed", max = MAX_TITLE_CHARS)]
    TooLong { len: usize },
}

/// Trim `raw` and check it against the title rules.
///
/// Returns the trimmed title, which is what gets sent to the server.
pub fn validate_title(raw: &str) -> Result<String, TitleError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong { len });
    }
    Ok(title.to_string())
}
