//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch any drift between the two.
//! The backend names the identifier `_id`, so that is the wire name, with
//! `id` accepted on input for servers that use the plain spelling.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by the API.
///
/// Items are value records: the client never edits one in place, it re-reads
/// the canonical copy from the server after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub description: String,
}

/// Request payload for flipping the completion flag of an existing todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompletionPatch {
    pub completed: bool,
}
