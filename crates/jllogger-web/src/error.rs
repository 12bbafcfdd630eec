//! HTTP error mapping for the append route

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use jllogger_core::Error;
use thiserror::Error;

use crate::ApiResponse;

/// Error returned by route handlers.
///
/// Everything except an unparsable body is reported as an opaque server
/// error; callers get no finer distinction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not JSON at all
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation, decoding and filesystem failures
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}
