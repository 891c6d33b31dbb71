use crate::db::{RecordChangeError, RepoError};
use crate::domain::PriceHistoryError;
use crate::engine::InvalidInput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unprocessable: {message}")]
    Unprocessable {
        message: String,
        field: Option<&'static str>,
    },
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<RecordChangeError> for AppError {
    fn from(err: RecordChangeError) -> Self {
        match err {
            RecordChangeError::Rejected(e) => e.into(),
            RecordChangeError::Repo(e) => e.into(),
        }
    }
}

impl From<InvalidInput> for AppError {
    fn from(err: InvalidInput) -> Self {
        AppError::Unprocessable {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

impl From<PriceHistoryError> for AppError {
    fn from(err: PriceHistoryError) -> Self {
        AppError::Unprocessable {
            field: Some("newPrice"),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, field) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unprocessable { message, field } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, field)
            }
        };

        let body = match field {
            Some(field) => Json(json!({ "error": error_message, "field": field })),
            None => Json(json!({ "error": error_message })),
        };

        (status, body).into_response()
    }
}
