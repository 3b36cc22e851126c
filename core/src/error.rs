//! Error types for the todo store, the log registry and the API client.
//!
//! # Design
//! Every store and registry error is a validated-input failure, never a
//! defect: each carries the human-readable message the service returns and
//! knows the HTTP status it maps to. The service prefixes the message with
//! `"Error: "` when it builds the response envelope.

use thiserror::Error;

use crate::types::TodoId;

/// Failures reported by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another live todo already uses this title.
    #[error("TODO with the title [{0}] already exists in the system")]
    DuplicateTitle(String),

    #[error("Can't create new TODO that its due date is in the past")]
    PastDueDate,

    /// The filter is not one of `ALL`, `PENDING`, `LATE`, `DONE`.
    #[error("Invalid status")]
    InvalidFilter,

    #[error("Invalid sortBy")]
    InvalidSortKey,

    #[error("no such TODO with id {0}")]
    NotFound(TodoId),

    /// The requested status is not one of `PENDING`, `LATE`, `DONE`.
    #[error("Invalid status")]
    InvalidStatus,
}

impl StoreError {
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::DuplicateTitle(_) | StoreError::PastDueDate => 409,
            StoreError::NotFound(_) => 404,
            StoreError::InvalidFilter | StoreError::InvalidSortKey | StoreError::InvalidStatus => 400,
        }
    }
}

/// Failures reported by `LogRegistry` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogControlError {
    #[error("Invalid logger name!")]
    UnknownLogger,

    #[error("Invalid level!")]
    InvalidLevel,
}

impl LogControlError {
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404. Carries the envelope's error message.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the request with any other non-200 status.
    #[error("HTTP {status}: {message}")]
    Service { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
