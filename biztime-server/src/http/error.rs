//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Constraint violated in the database (500, message passed through)
    Constraint { message: String },

    /// Any other database failure (500, message passed through)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Constraint { .. } | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message) = match &self {
            Self::Validation(e) => ("validation_error", e.to_string()),
            Self::NotFound { resource, id } => {
                ("not_found", format!("{} '{}' not found", resource, id))
            }
            Self::Constraint { message } => {
                tracing::warn!("Constraint violation: {}", message);
                ("constraint_violation", message.clone())
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("internal_error", database_message(e))
            }
        };

        let body = json!({
            "error": kind,
            "message": message,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// The server's own wording when PostgreSQL rejected the statement,
/// otherwise the driver error (pool timeout, I/O, decode).
fn database_message(err: &DbError) -> String {
    match err {
        DbError::Sqlx(e) => match e.as_database_error() {
            Some(db_err) => db_err.message().to_owned(),
            None => e.to_string(),
        },
        other => other.to_string(),
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Constraint { message, .. } => Self::Constraint { message },
            _ => Self::Database(e),
        }
    }
}
