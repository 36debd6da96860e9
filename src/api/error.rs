//! HTTP error responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::coverage::CoverageError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Partner not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    /// Client sent a body, query or coverage area that cannot be used
    #[error("{0}")]
    BadRequest(String),

    /// Stored coverage area cannot be used
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    /// Coverage supplied in a request body
    pub fn invalid_input(error: CoverageError) -> Self {
        ApiError::BadRequest(error.to_string())
    }

    /// Coverage read back from the store
    pub fn invalid_stored(id: &str, error: CoverageError) -> Self {
        tracing::warn!("Stored coverage of partner {} is unusable: {}", id, error);
        ApiError::Unprocessable(error.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::AlreadyExists(_) => ApiError::Conflict(error.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
