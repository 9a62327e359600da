use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

#[derive(Debug)]
pub enum AppError {
    MissingFields(String),
    InvalidRequest(String),
    EmailExists(String),
    NotFound { error: &'static str, details: String },
    BadGateway { error: &'static str, details: String },
    Internal { error: &'static str, details: String },
}

impl AppError {
    pub fn internal(error: &'static str, details: impl Into<String>) -> Self {
        AppError::Internal { error, details: details.into() }
    }

    pub fn bad_gateway(error: &'static str, details: impl Into<String>) -> Self {
        AppError::BadGateway { error, details: details.into() }
    }

    pub fn not_found(error: &'static str, details: impl Into<String>) -> Self {
        AppError::NotFound { error, details: details.into() }
    }

    /// Short label shown in the `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "Missing fields.",
            AppError::InvalidRequest(_) => "Invalid request body.",
            AppError::EmailExists(_) => "Email already exists.",
            AppError::NotFound { error, .. }
            | AppError::BadGateway { error, .. }
            | AppError::Internal { error, .. } => error,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            AppError::MissingFields(msg)
            | AppError::InvalidRequest(msg)
            | AppError::EmailExists(msg) => msg,
            AppError::NotFound { details, .. }
            | AppError::BadGateway { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Failures caused by this service or its dependencies rather than the caller.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Logs at error level for 5xx and warn level for caller mistakes.
    pub fn log(&self, context: &str) {
        if self.is_server_error() {
            log::error!("❌ {}: {}", context, self);
        } else {
            log::warn!("⚠️  {}: {}", context, self);
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.details())
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EmailExists(_) => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.label().to_string(),
            details: self.details().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingFields("email".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::EmailExists("a@b.com".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("User not found.", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_gateway("Failed to write to identity API", "x").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::internal("Signup failed", "x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_label_and_details() {
        let err = AppError::internal("Login failed", "connection refused");
        assert_eq!(err.label(), "Login failed");
        assert_eq!(err.details(), "connection refused");
        assert_eq!(err.to_string(), "Login failed connection refused");
    }

    #[test]
    fn test_server_errors_are_split_from_caller_errors() {
        assert!(AppError::internal("Signup failed", "x").is_server_error());
        assert!(AppError::bad_gateway("Failed to write to identity API", "x").is_server_error());

        assert!(!AppError::MissingFields("email".into()).is_server_error());
        assert!(!AppError::InvalidRequest("eof".into()).is_server_error());
        assert!(!AppError::EmailExists("a@b.com".into()).is_server_error());
        assert!(!AppError::not_found("User not found.", "x").is_server_error());
    }
}
