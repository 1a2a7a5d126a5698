//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::db::DbError;
use crate::features::shared::validation::FieldError;

/// Result type alias for HTTP handlers
pub type ApiResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        details: Option<Value>,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(message) => ErrorResponse::new("NOT_FOUND", message),
            AppError::BadRequest(message) => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Validation { message, details } => match details {
                Some(details) => ErrorResponse::with_details("VALIDATION_ERROR", message, details),
                None => ErrorResponse::new("VALIDATION_ERROR", message),
            },
            AppError::Conflict { message, details } => match details {
                Some(details) => ErrorResponse::with_details("CONFLICT", message, details),
                None => ErrorResponse::new("CONFLICT", message),
            },
            AppError::Unavailable(message) => {
                tracing::warn!("Service unavailable: {}", message);
                ErrorResponse::new("SERVICE_UNAVAILABLE", message)
            },
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            },
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                ErrorResponse::new("INTERNAL_ERROR", "A database error occurred")
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(message) => AppError::NotFound(message),
            DbError::Duplicate(message) => AppError::Conflict {
                message,
                details: None,
            },
            DbError::InvalidReference { entity, id } => AppError::validation_with_details(
                format!("{} {} does not exist", entity, id),
                serde_json::json!({ "entity": entity, "id": id }),
            ),
            DbError::Constraint(name) => {
                AppError::validation(format!("Constraint '{}' violated", name))
            },
            DbError::SeatTaken(conflict) => AppError::conflict(
                conflict.to_string(),
                serde_json::to_value(conflict).unwrap_or(Value::Null),
            ),
            DbError::Placement { index, error } => {
                FieldError::from(error).at_ticket(index).into()
            },
            other @ (DbError::Sqlx(_) | DbError::Config(_)) => AppError::Database(other),
        }
    }
}
