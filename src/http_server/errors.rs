//! Read API errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::RunError;
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Read API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Lookup key failed its shape validation. No store query was
    /// performed.
    #[error("{0}")]
    InvalidFormat(String),

    /// Lookup matched zero records.
    #[error("{0}")]
    NotFound(String),

    /// The store failed while serving a lookup.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// A triggered pipeline run failed or was refused.
    #[error(transparent)]
    Run(#[from] RunError),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Run(RunError::RunInProgress) => StatusCode::CONFLICT,
            ApiError::Run(RunError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Run(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
