//! Request-boundary errors and their HTTP mapping.
//!
//! Every failure leaves a handler as an `AppError` and is rendered as
//! `{ "error": "<message>" }` with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid todo id")]
    InvalidId(String),
    #[error("Todo not found")]
    NotFound(u64),
    #[error("Not found")]
    UnknownRoute,
    #[error("Internal server error")]
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UnknownRoute => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyTitle => AppError::Validation(err.to_string()),
            StoreError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(detail) => tracing::error!(%detail, "request failed"),
            AppError::InvalidId(raw) => tracing::debug!(%raw, "rejected todo id"),
            other => tracing::debug!(error = %other, status = status.as_u16(), "request rejected"),
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
