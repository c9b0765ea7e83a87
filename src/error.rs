//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service returns [`AppError`]. The HTTP layer
//! turns it into a JSON body of the form:
//!
//! ```json
//! { "error": "Invalid URL format", "code": "validation_error", "details": { "url": "nope" } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Maps to 400.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code. Maps to 404.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Short code exists but its lifetime has elapsed. Maps to 410.
    #[error("{message}")]
    Gone { message: String, details: Value },

    /// Uniqueness violation reported by the link store. Maps to 409.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Code issuance gave up after the bounded number of attempts. Maps to 503.
    #[error("{message}")]
    CapacityExhausted { message: String, details: Value },

    /// Store or other server-side failure. Maps to 500.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn capacity_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CapacityExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gone { .. } => StatusCode::GONE,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Gone { .. } => "expired",
            Self::Conflict { .. } => "conflict",
            Self::CapacityExhausted { .. } => "capacity_exhausted",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its serializable body.
    pub fn into_body(self) -> ErrorBody {
        let code = self.error_code();
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Gone { message, details }
            | Self::Conflict { message, details }
            | Self::CapacityExhausted { message, details }
            | Self::Internal { message, details } => (message, details),
        };

        ErrorBody {
            error: message,
            code,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));

        AppError::bad_request(message, details)
    }
}
