//! Mapping from core errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::{Envelope, LogControlError, StoreError};
use tracing::error;

use crate::telemetry::TODO_LOGGER;

/// Any failure a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Logs(#[from] LogControlError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let code = match self {
            ApiError::Store(e) => e.status_code(),
            ApiError::Logs(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()>::err(&self);
        // Only todo operations report their failures on the todo channel.
        if let (ApiError::Store(_), Some(message)) = (&self, &body.error_message) {
            error!(target: TODO_LOGGER, "{message}");
        }
        (self.status(), Json(body)).into_response()
    }
}
