//! Error types for the todo API client.
//!
//! # Design
//! Two kinds only. `Http` covers any non-2xx response and keeps the status
//! and body as structured data; `Transport` covers everything that failed
//! before a usable response existed (connection, I/O, undecodable JSON).
//! The `Display` output of each variant is the human-readable message the
//! presentation layer shows, and the `HTTP error: <status> <body>` format is
//! relied on by existing callers, so it must not change.

/// Fallback message for a transport failure that carried no text.
pub const NETWORK_ERROR: &str = "Network error";

/// Errors produced by every `TodoCollection` operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP error: {status} {body}")]
    Http { status: u16, body: String },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Build a `Transport` error, substituting [`NETWORK_ERROR`] for an empty
    /// message.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            ApiError::Transport(NETWORK_ERROR.to_string())
        } else {
            ApiError::Transport(message)
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Outcome of a single remote collection operation.
pub type OperationResult<T> = Result<T, ApiError>;
