//! Votebox — API error types.

use axum::Json;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use votebox_core::error::DomainError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Initial catalog load or seed failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] DomainError),

    /// Tracing/telemetry pipeline could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the voting service.
    Domain(DomainError),
    /// The request body could not be read as the expected JSON.
    InvalidRequest(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Domain(err) => err,
            Self::InvalidRequest(detail) => {
                let body = ErrorBody {
                    error: "invalid_request",
                    message: format!("request is invalid: {detail}"),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        };

        let (status, error_code) = match &err {
            DomainError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "product_not_found"),
            DomainError::InvalidRate(_) => (StatusCode::BAD_REQUEST, "invalid_rate"),
            DomainError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            DomainError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
        };

        if !err.is_client_error() {
            tracing::error!(error = %err, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: err.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections render as an [`ErrorBody`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
