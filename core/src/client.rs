//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Every JSON endpoint answers with the
//! same `{"result"}` / `{"errorMessage"}` envelope, so all `parse_*` methods
//! share `parse_envelope`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::logs::LogLevel;
use crate::types::{Envelope, Filter, NewTodo, SortKey, Status, Todo, TodoId};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: HttpMethod, path: &str, query: &[(&str, &str)]) -> HttpRequest {
        let mut url = format!("{}{path}", self.base_url);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        HttpRequest {
            method,
            path: url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todo/health", &[])
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/todo", &[]);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_count(&self, filter: Filter) -> HttpRequest {
        self.request(HttpMethod::Get, "/todo/size", &[("status", filter.as_str())])
    }

    /// `sort` of `None` leaves the choice to the server, which orders by id.
    pub fn build_list(&self, filter: Filter, sort: Option<SortKey>) -> HttpRequest {
        match sort {
            Some(sort) => self.request(
                HttpMethod::Get,
                "/todo/content",
                &[("status", filter.as_str()), ("sortBy", sort.as_str())],
            ),
            None => self.request(HttpMethod::Get, "/todo/content", &[("status", filter.as_str())]),
        }
    }

    pub fn build_update_status(&self, id: TodoId, status: Status) -> HttpRequest {
        let id = id.to_string();
        self.request(
            HttpMethod::Put,
            "/todo",
            &[("id", id.as_str()), ("status", status.as_str())],
        )
    }

    pub fn build_delete(&self, id: TodoId) -> HttpRequest {
        let id = id.to_string();
        self.request(HttpMethod::Delete, "/todo", &[("id", id.as_str())])
    }

    pub fn build_get_level(&self, logger: &str) -> HttpRequest {
        self.request(HttpMethod::Get, "/logs/level", &[("logger-name", logger)])
    }

    pub fn build_set_level(&self, logger: &str, level: LogLevel) -> HttpRequest {
        self.request(
            HttpMethod::Put,
            "/logs/level",
            &[("logger-name", logger), ("logger-level", level.as_str())],
        )
    }

    /// The health probe answers with plain text rather than an envelope.
    pub fn parse_health(&self, response: HttpResponse) -> Result<String, ApiError> {
        if response.status != 200 {
            return Err(ApiError::Service {
                status: response.status,
                message: response.body,
            });
        }
        Ok(response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoId, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_count(&self, response: HttpResponse) -> Result<usize, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_envelope(response)
    }

    /// Returns the status the todo held before the update.
    pub fn parse_update_status(&self, response: HttpResponse) -> Result<Status, ApiError> {
        parse_envelope(response)
    }

    /// Returns the number of todos left after the delete.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<usize, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_get_level(&self, response: HttpResponse) -> Result<LogLevel, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_set_level(&self, response: HttpResponse) -> Result<LogLevel, ApiError> {
        parse_envelope(response)
    }
}

/// Decode the response envelope and map non-200 statuses to `ApiError`.
fn parse_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if response.status != 200 {
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&response.body)
            .ok()
            .and_then(|e| e.error_message)
            .unwrap_or(response.body);
        if response.status == 404 {
            return Err(ApiError::NotFound(message));
        }
        return Err(ApiError::Service {
            status: response.status,
            message,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    envelope
        .result
        .ok_or_else(|| ApiError::DeserializationError("envelope has no result".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_create_todo_produces_json_body() {
        let input = NewTodo {
            title: "Buy milk".to_string(),
            content: "2%".to_string(),
            due_date: 1_900_000_000_000,
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["dueDate"], 1_900_000_000_000_i64);
    }

    #[test]
    fn build_list_without_sort_omits_sort_by() {
        let req = client().build_list(Filter::Only(Status::Pending), None);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo/content?status=PENDING");
    }

    #[test]
    fn build_list_with_sort() {
        let req = client().build_list(Filter::All, Some(SortKey::DueDate));
        assert_eq!(
            req.path,
            "http://localhost:3000/todo/content?status=ALL&sortBy=DUE_DATE"
        );
    }

    #[test]
    fn build_update_status_puts_query_params() {
        let req = client().build_update_status(TodoId(2), Status::Done);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todo?id=2&status=DONE");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_level_requests_encode_logger_name() {
        let req = client().build_set_level("todo logger", LogLevel::Debug);
        assert_eq!(
            req.path,
            "http://localhost:3000/logs/level?logger-name=todo%20logger&logger-level=DEBUG"
        );
        let req = client().build_get_level("request-logger");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/logs/level?logger-name=request-logger");
    }

    #[test]
    fn parse_create_todo_success() {
        let id = client().parse_create_todo(response(200, r#"{"result":1}"#)).unwrap();
        assert_eq!(id, TodoId(1));
    }

    #[test]
    fn parse_create_todo_conflict_carries_message() {
        let err = client()
            .parse_create_todo(response(
                409,
                r#"{"errorMessage":"Error: Can't create new TODO that its due date is in the past"}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::Service { status, message } => {
                assert_eq!(status, 409);
                assert!(message.starts_with("Error: "));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_delete_not_found() {
        let err = client()
            .parse_delete(response(404, r#"{"errorMessage":"Error: no such TODO with id 99"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "Error: no such TODO with id 99"));
    }

    #[test]
    fn parse_non_envelope_error_keeps_raw_body() {
        let err = client().parse_count(response(400, "Failed to deserialize")).unwrap_err();
        assert!(matches!(err, ApiError::Service { status: 400, message } if message == "Failed to deserialize"));
    }

    #[test]
    fn parse_update_status_returns_previous() {
        let old = client()
            .parse_update_status(response(200, r#"{"result":"PENDING"}"#))
            .unwrap();
        assert_eq!(old, Status::Pending);
    }

    #[test]
    fn parse_get_level() {
        let level = client().parse_get_level(response(200, r#"{"result":"ERROR"}"#)).unwrap();
        assert_eq!(level, LogLevel::Error);
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_success_without_result_is_an_error() {
        let err = client().parse_count(response(200, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_health_plain_text() {
        assert_eq!(client().parse_health(response(200, "OK")).unwrap(), "OK");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_health();
        assert_eq!(req.path, "http://localhost:3000/todo/health");
    }
}
