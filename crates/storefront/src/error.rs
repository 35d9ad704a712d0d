//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::BackendError;

/// Application error type.
///
/// Every variant renders the same envelope:
/// `{"success": false, "message": "...", "error": "..."}` where `error` is
/// only present when there is a detail worth showing.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Backend answered with a failure status
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    // Backend call failed outright
    #[error("{message}")]
    Backend {
        message: String,
        detail: Option<String>,
    },
    #[error("{0}")]
    BadGateway(String),
}

impl ApiError {
    /// Backend failure with a fixed user-facing message and no detail
    pub fn backend(message: impl Into<String>) -> Self {
        ApiError::Backend {
            message: message.into(),
            detail: None,
        }
    }

    /// Backend failure that also reports the underlying error
    pub fn backend_with_detail(message: impl Into<String>, err: &BackendError) -> Self {
        ApiError::Backend {
            message: message.into(),
            detail: Some(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Backend {
                message,
                detail: Some(detail),
            } => json!({
                "success": false,
                "message": message,
                "error": detail,
            }),
            _ => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
