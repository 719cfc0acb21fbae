//! Unified error handling.
//!
//! All route handlers return `Result<T, AppError>`. The `IntoResponse`
//! mapping is the single place where failures turn into HTTP statuses:
//! 401 for a missing/invalid session, 403 for an identity mismatch, 400 for
//! malformed parameters, 500 for store failures. Store detail is logged but
//! never leaks into the response body. A single-item lookup miss is not an
//! error at all; handlers answer those with an empty object.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::query::ParamError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication or ownership failure.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Record store operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Malformed numeric request parameter.
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    /// Bad request from the client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::MissingToken | AuthError::InvalidOrExpired) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::Signing)
            | Self::Repository(
                RepositoryError::Database(_) | RepositoryError::Serialization(_),
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Repository(RepositoryError::InvalidId(_))
            | Self::Param(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Server-side failures get a generic body.
    fn message(&self) -> String {
        match self {
            Self::Auth(AuthError::MissingToken | AuthError::InvalidOrExpired) => {
                "Unauthorized access".to_string()
            }
            Self::Auth(AuthError::Forbidden) => "Forbidden access".to_string(),
            Self::Auth(AuthError::Signing)
            | Self::Repository(
                RepositoryError::Database(_) | RepositoryError::Serialization(_),
            )
            | Self::Internal(_) => "Internal server error".to_string(),
            Self::Repository(RepositoryError::InvalidId(_)) => "Invalid id parameter".to_string(),
            Self::Param(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
