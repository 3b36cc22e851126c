//! Domain types for the todo service.
//!
//! # Design
//! `NewTodo` is the shape a caller submits; `Todo` is the shape the store
//! keeps and hands back. They are two plain structs joined by `Todo::new`,
//! so the stored record gains its `id` and `status` in exactly one place.
//! Field names follow the wire format (`dueDate`, `errorMessage`) through
//! serde renames rather than leaking camelCase into Rust code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Identifier assigned by the store on insert. Starts at 1, never reused.
/// Signed so that a zero or negative id from a caller is simply not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a todo. Transitions are always caller-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Late,
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Late => "LATE",
            Status::Done => "DONE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Status::Pending),
            "LATE" => Ok(Status::Late),
            "DONE" => Ok(Status::Done),
            _ => Err(StoreError::InvalidStatus),
        }
    }
}

/// Selection applied before counting or listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Only(Status),
}

impl Filter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(status) => todo.status == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "ALL",
            Filter::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            return Ok(Filter::All);
        }
        s.parse::<Status>()
            .map(Filter::Only)
            .map_err(|_| StoreError::InvalidFilter)
    }
}

/// Field a listing is ordered by. Every ordering is ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    DueDate,
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::DueDate => "DUE_DATE",
            SortKey::Title => "TITLE",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(SortKey::Id),
            "DUE_DATE" => Ok(SortKey::DueDate),
            "TITLE" => Ok(SortKey::Title),
            _ => Err(StoreError::InvalidSortKey),
        }
    }
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub content: String,
    /// Epoch milliseconds.
    #[serde(rename = "dueDate")]
    pub due_date: i64,
}

/// A todo as held by the store and returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub content: String,
    #[serde(rename = "dueDate")]
    pub due_date: i64,
    pub status: Status,
}

impl Todo {
    /// Promote a submitted `NewTodo` to a stored record in `PENDING` state.
    pub fn new(id: TodoId, input: NewTodo) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            due_date: input.due_date,
            status: Status::Pending,
        }
    }
}

/// Uniform response body: exactly one of `result` / `errorMessage` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error_message: None,
        }
    }

    /// Wrap a failure; the message is prefixed with `"Error: "`.
    pub fn err(message: impl fmt::Display) -> Self {
        Self {
            result: None,
            error_message: Some(format!("Error: {message}")),
        }
    }
}
