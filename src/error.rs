//! Unified error types for the secret message service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::types::ErrorBody;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Persistence errors.
///
/// Callers never discriminate between kinds; any of these becomes a 500.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query, connection or pool error from the driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend refused to serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown path, or an item that does not exist.
    #[error("not found")]
    NotFound,

    /// Known path, unsupported method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Malformed request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request refused by an extractor before reaching the handler body.
    #[error("{message}")]
    Rejected {
        /// Status chosen by the extractor (e.g. 413).
        status: StatusCode,
        /// Extractor's explanation.
        message: String,
    },

    /// Persistence failure.
    #[error("internal server error")]
    Internal(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref source) = self {
            error!(error = %source, "store call failed");
        }

        // Internal detail stays in the log; Display for Internal is generic.
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_kinds() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::Unavailable("down".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejected_keeps_extractor_status() {
        let err = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "length limit exceeded");
    }

    #[test]
    fn store_errors_convert_into_service_errors() {
        let err: ServiceError = StoreError::Unavailable("down".to_string()).into();
        assert_eq!(err.to_string(), "store error: store unavailable: down");
    }

    #[test]
    fn internal_error_hides_store_detail() {
        let err = ApiError::from(StoreError::Unavailable("password=hunter2".to_string()));
        assert_eq!(err.to_string(), "internal server error");
    }
}
