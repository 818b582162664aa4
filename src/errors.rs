use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid path")]
    PathEscape,
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PathEscape => "PathEscape",
            AppError::NotFound(_) => "NotFound",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PathEscape => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Plain-text error responses: a rejected path gets a generic body with no
/// filesystem details; a missing path echoes the underlying io error.
pub fn into_response(err: AppError) -> Response {
    (err.status(), err.to_string()).into_response()
}
