//! Server error types.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entities::{FilmId, UserId, ValidationError};
use film_store::StoreError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Input failed entity validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Film not found.
    #[error("Film with id {0} not found")]
    FilmNotFound(FilmId),

    /// User not found.
    #[error("User with id {0} not found")]
    UserNotFound(UserId),

    /// Catalog entry (MPA rating or genre) not found.
    #[error("{kind} with id {id} not found")]
    IllegalId { kind: &'static str, id: i64 },

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ServerError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::FilmNotFound(_)
            | ServerError::UserNotFound(_)
            | ServerError::IllegalId { .. }
            | ServerError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed summary phrase for the error kind.
    pub fn summary(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "Invalid input data.",
            ServerError::InvalidRequest(_) => "Invalid request.",
            ServerError::FilmNotFound(_) => "Film not found.",
            ServerError::UserNotFound(_) => "User not found.",
            ServerError::IllegalId { .. } => "Illegal id.",
            ServerError::Store(StoreError::NotFound { .. }) => "Not found.",
            ServerError::Store(_) => "Internal server error.",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %detail, "Request failed");
        } else if status == StatusCode::NOT_FOUND {
            tracing::warn!(error = %detail, "Resource not found");
        }

        let body = json!({
            "summary": self.summary(),
            "detail": detail,
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
