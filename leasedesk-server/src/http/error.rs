//! API error type with IntoResponse
//!
//! Every failure is rendered as the uniform envelope
//! `{"success": false, "error": "..."}` with a matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leasedesk_core::{Envelope, ValidationError};

use crate::auth::PasswordError;
use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body was not valid JSON for the endpoint (400)
    MalformedBody { message: String },

    /// Query string could not be decoded (400)
    MalformedQuery { message: String },

    /// Wrong credentials (401)
    Unauthorized { message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Database error (500, logged, raw message surfaced)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody { .. } | Self::MalformedQuery { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::MalformedBody { message } => format!("invalid JSON body: {}", message),
            Self::MalformedQuery { message } => format!("invalid query string: {}", message),
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Internal { message } => message.clone(),
            Self::Database(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            Self::Database(e) => tracing::error!(error = %e, "Database error"),
            Self::Internal { .. } => tracing::error!(error = %message, "Internal error"),
            _ => tracing::debug!(status = status.as_u16(), error = %message, "Request rejected"),
        }

        (status, Json(Envelope::error(message))).into_response()
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
            DbError::NotFound { resource, id } => Self::NotFound {
                message: format!("{} '{}' not found", resource, id),
            },
            _ => Self::Database(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}
