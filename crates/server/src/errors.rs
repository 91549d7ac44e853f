use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::validation::FieldErrors;

pub const NOT_PROVIDED: &str = "Authentication credentials were not provided.";
pub const INVALID_TOKEN: &str = "Invalid token.";
pub const INACTIVE_USER: &str = "User inactive or deleted.";
pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND: &str = "Not found.";

/// Error returned by every handler and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Body could not be read as the expected JSON.
    #[error("bad request: {1}")]
    Rejected(StatusCode, String),
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::Rejected(status, detail) => (status, Json(json!({ "detail": detail }))).into_response(),
            ApiError::Unauthorized(detail) => {
                let mut resp = (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response();
                resp.headers_mut().insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Token"));
                resp
            }
            ApiError::Forbidden => (StatusCode::FORBIDDEN, Json(json!({ "detail": FORBIDDEN }))).into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(json!({ "detail": NOT_FOUND }))).into_response(),
            ApiError::Internal(cause) => {
                error!(error = %cause, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "internal server error" }))).into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if let Some(errors) = e.field_errors() {
            return ApiError::Validation(errors);
        }
        match e {
            AuthError::InvalidToken => ApiError::Unauthorized(INVALID_TOKEN),
            AuthError::InactiveUser => ApiError::Unauthorized(INACTIVE_USER),
            other => ApiError::Internal(format!("auth error {}: {}", other.code(), other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        warn!(error = %detail, "rejected request body");
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::Rejected(status, detail)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
