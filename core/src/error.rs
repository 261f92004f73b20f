//! Error types for the todo sync client.
//!
//! # Design
//! Two layers. `ApiError` describes what actually went wrong on the wire and
//! is only ever logged. `SyncError` is what an operation reports to the user:
//! one fixed message per operation, whatever the underlying cause was.

use thiserror::Error;

use crate::types::TitleError;

/// Diagnostic cause of a failed remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// User-facing outcome of a failed Sync Controller operation.
///
/// The `Display` text of the four failure variants is exactly the message
/// shown in the view state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Failed to load todos. Make sure the backend is running.")]
    LoadFailure,

    #[error("Failed to add todo")]
    CreateFailure,

    #[error("Failed to update todo")]
    UpdateFailure,

    #[error("Failed to delete todo")]
    DeleteFailure,

    /// Rejected before any request was made. Never stored as the view error.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),
}
