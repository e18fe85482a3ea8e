use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use app::error::ArenaError;

use crate::extractor::Json;
use crate::models::response::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    Arena(ArenaError),
    /// Malformed or invalid request body.
    BadRequest(String),
    Unauthorized,
}

impl ApiError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_owned(),
            ),
            ApiError::Arena(err) => {
                let message = err.to_string();
                match err {
                    ArenaError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
                    ArenaError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE", message),
                    ArenaError::Full => (StatusCode::CONFLICT, "TOURNAMENT_FULL", message),
                    ArenaError::AlreadyJoined => (StatusCode::CONFLICT, "ALREADY_JOINED", message),
                    ArenaError::NotRegistered => (StatusCode::CONFLICT, "NOT_REGISTERED", message),
                    ArenaError::AlreadySubmitted => {
                        (StatusCode::CONFLICT, "ALREADY_SUBMITTED", message)
                    }
                    ArenaError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", message),
                    ArenaError::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
                    }
                    ArenaError::StorageUnavailable(detail) => {
                        tracing::error!("Storage error: {}", detail);
                        (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE", message)
                    }
                }
            }
        };

        (status, ErrorBody { code, message })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<ArenaError> for ApiError {
    fn from(err: ArenaError) -> Self {
        ApiError::Arena(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}
