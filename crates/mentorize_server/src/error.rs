//! HTTP error mapping.
//!
//! # Invariants
//! - Every error body is `{"error": "<message>"}`.
//! - Storage failure details are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use mentorize_core::{RepoError, ServiceError, ValidationError};
use serde_json::json;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            err @ ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Validation(err) => Self::BadRequest(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        ServiceError::from(value).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound(message) | Self::BadRequest(message) => message,
            Self::Internal(details) => {
                error!("event=http_error module=server status=error error={details}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use mentorize_core::{RepoError, ServiceError, ValidationError};

    #[test]
    fn service_errors_map_to_status_codes() {
        let not_found = ApiError::from(ServiceError::NotFound {
            entity: "task",
            id: 4,
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(ServiceError::Validation(ValidationError::Blank {
            field: "title",
        }));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let storage = ApiError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
