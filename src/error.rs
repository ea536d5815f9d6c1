use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::DomainError;

/// Errors surfaced to HTTP clients. Bodies never carry internal detail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::InvalidInput(msg) => AppError::MalformedPayload(msg),
            DomainError::Internal(msg) => AppError::InternalError(msg),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}

/// Startup failures
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(#[from] rolling_logger::LoggerError),

    #[error("Database error: {0}")]
    Database(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let not_found: AppError = DomainError::NotFound("Category Work".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: AppError =
            DomainError::InvalidInput("Item name is required".to_string()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let internal: AppError = DomainError::Internal("disk I/O error".to_string()).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_response_hides_detail() {
        let response = AppError::InternalError("database is locked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(body, "Internal Server Error");
        assert!(!body.contains("database is locked"));
    }
}
