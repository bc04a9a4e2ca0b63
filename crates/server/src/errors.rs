use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// API error with a status code and a `{"message": ...}` JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "api error");
        }
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Internal detail stays in the log, not the response body
        let message = match &e {
            ServiceError::Db(detail) => {
                error!(detail = %detail, "database error");
                "Internal server error".to_string()
            }
            ServiceError::Unavailable(detail) => {
                error!(detail = %detail, "database unavailable");
                "Service temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::Unauthorized | AuthError::TokenError(_) => StatusCode::UNAUTHORIZED,
            AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::HashError(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &e {
            AuthError::Validation(m) => m.clone(),
            AuthError::Conflict => e.to_string(),
            AuthError::Unauthorized | AuthError::TokenError(_) => "Invalid credentials".to_string(),
            AuthError::Unavailable(detail) => {
                error!(detail = %detail, code = e.code(), "database unavailable");
                "Service temporarily unavailable".to_string()
            }
            AuthError::HashError(detail) | AuthError::Repository(detail) => {
                error!(detail = %detail, code = e.code(), "auth internal error");
                "Internal server error".to_string()
            }
        };
        Self { status, message }
    }
}
