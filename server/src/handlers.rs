//! Route handlers. Each one performs a single store or registry call and
//! describes what happened on the `todo-logger` channel.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use todo_core::{
    Envelope, Filter, Inserted, Listing, LogLevel, NewTodo, SortKey, Status, Todo, TodoId,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::telemetry::TODO_LOGGER;
use crate::AppState;

pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentParams {
    pub status: String,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoggerParams {
    #[serde(rename = "logger-name")]
    pub logger_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetLevelParams {
    #[serde(rename = "logger-name")]
    pub logger_name: String,
    #[serde(rename = "logger-level")]
    pub logger_level: String,
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<NewTodo>,
) -> ApiResult<TodoId> {
    let Inserted { todo, previous_len } = state.store.insert(input)?;
    info!(target: TODO_LOGGER, "Creating new TODO with Title [{}]", todo.title);
    debug!(
        target: TODO_LOGGER,
        "Currently there are {previous_len} Todos in the system. New TODO will be assigned with id {}",
        todo.id
    );
    Ok(Json(Envelope::ok(todo.id)))
}

pub async fn count_todos(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> ApiResult<usize> {
    let filter: Filter = params.status.parse()?;
    let count = state.store.count(filter);
    info!(target: TODO_LOGGER, "Total TODOs count for state {filter} is {count}");
    Ok(Json(Envelope::ok(count)))
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ContentParams>,
) -> ApiResult<Vec<Todo>> {
    let filter: Filter = params.status.parse()?;
    let sort = params
        .sort_by
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()?
        .unwrap_or_default();

    let Listing { todos, total } = state.store.list(filter, sort);
    info!(target: TODO_LOGGER, "Extracting todos content. Filter: {filter} | Sorting by: {sort}");
    debug!(
        target: TODO_LOGGER,
        "There are a total of {total} todos in the system. The result holds {} todos",
        todos.len()
    );
    Ok(Json(Envelope::ok(todos)))
}

pub async fn update_status(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> ApiResult<Status> {
    let id = TodoId(params.id);
    info!(target: TODO_LOGGER, "Update TODO id [{id}] state to {}", params.status);
    let previous = state.store.update_status(id, &params.status)?;
    debug!(
        target: TODO_LOGGER,
        "Todo id [{id}] state change: {previous} --> {}",
        params.status
    );
    Ok(Json(Envelope::ok(previous)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> ApiResult<usize> {
    let id = TodoId(params.id);
    let remaining = state.store.delete(id)?;
    info!(target: TODO_LOGGER, "Removing todo id {id}");
    debug!(
        target: TODO_LOGGER,
        "After removing todo id [{id}] there are {remaining} TODOs in the system"
    );
    Ok(Json(Envelope::ok(remaining)))
}

pub async fn get_level(
    State(state): State<AppState>,
    Query(params): Query<LoggerParams>,
) -> ApiResult<LogLevel> {
    let level = state.logs.get_level(&params.logger_name)?;
    Ok(Json(Envelope::ok(level)))
}

pub async fn set_level(
    State(state): State<AppState>,
    Query(params): Query<SetLevelParams>,
) -> ApiResult<LogLevel> {
    let level = state
        .logs
        .set_level(&params.logger_name, &params.logger_level)?;
    Ok(Json(Envelope::ok(level)))
}
