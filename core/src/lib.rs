//! Core of the todo service: the store, the log-level registry and a typed
//! client for the HTTP API.
//!
//! # Overview
//! `TodoStore` owns every todo and enforces title uniqueness, id allocation
//! and due-date validation. `LogRegistry` holds the runtime-adjustable
//! thresholds of the `todo-logger` and `request-logger` channels. Neither
//! logs on its own; they return enough data for the HTTP layer to describe
//! each action.
//!
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern).

pub mod client;
pub mod clock;
pub mod error;
pub mod http;
pub mod logs;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, LogControlError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use logs::{Channel, LogLevel, LogRegistry};
pub use store::{Inserted, Listing, TodoStore};
pub use types::{Envelope, Filter, NewTodo, SortKey, Status, Todo, TodoId};
