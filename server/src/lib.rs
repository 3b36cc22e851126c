//! HTTP gateway for the todo service.
//!
//! Routes map one-to-one onto `TodoStore` and `LogRegistry` operations.
//! Every JSON response uses the `{"result"}` / `{"errorMessage"}` envelope.
//! Request telemetry and domain events are emitted through `tracing` on the
//! `request-logger` and `todo-logger` targets, whose thresholds can be
//! changed at runtime through `/logs/level`.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use todo_core::{LogRegistry, TodoStore};
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod handlers;
pub mod telemetry;

/// State shared by every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub logs: Arc<LogRegistry>,
    /// Number the next request will be logged under.
    pub requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(logs: LogRegistry) -> Self {
        Self {
            store: Arc::new(TodoStore::new()),
            logs: Arc::new(logs),
            requests: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LogRegistry::default())
    }
}

/// Router over a fresh, empty store with default log levels.
pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/todo/health", get(handlers::health))
        .route(
            "/todo",
            post(handlers::create_todo)
                .put(handlers::update_status)
                .delete(handlers::delete_todo),
        )
        .route("/todo/size", get(handlers::count_todos))
        .route("/todo/content", get(handlers::list_todos))
        .route("/logs/level", get(handlers::get_level).put(handlers::set_level))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            telemetry::track_request,
        ))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}
