//! Error handling module
//!
//! Centralized error type and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("account not found: {0}")]
    AccountNotFound(i64),

    // Validation failures; nothing was persisted
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The discharge sequence aborted; the unit of work rolled back and the
    /// ledger is fully pre-discharge.
    #[error("settlement failed for credit transaction {transaction_id}")]
    SettlementFailed {
        transaction_id: i64,
        #[source]
        source: RepositoryError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Repository(RepositoryError::Database(err))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 404 Not Found
            AppError::AccountNotFound(id) => {
                (StatusCode::NOT_FOUND, "account_not_found", Some(id.to_string()))
            }

            // 400 Bad Request
            AppError::Domain(err) => {
                let code = match err {
                    DomainError::ZeroAmount | DomainError::NegativeAmount => "invalid_amount",
                    DomainError::InvalidOperationKind(_) => "invalid_operation_type",
                    DomainError::InvalidDocumentNumber => "invalid_request",
                };
                (StatusCode::BAD_REQUEST, code, Some(err.to_string()))
            }

            AppError::Repository(err) => match err {
                RepositoryError::NotFound => (StatusCode::NOT_FOUND, "not_found", None),
                RepositoryError::ForeignKeyViolation { reference } => (
                    StatusCode::BAD_REQUEST,
                    "invalid_reference",
                    Some(format!("{} does not exist", reference)),
                ),
                RepositoryError::UniqueViolation { .. } => {
                    (StatusCode::CONFLICT, "conflict", Some(err.to_string()))
                }
                RepositoryError::InconsistentUpdate { .. } => {
                    tracing::error!("inconsistent update: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "inconsistent_update", None)
                }
                RepositoryError::Database(e) => {
                    tracing::error!("database error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
                }
            },

            // 500 Internal Server Error
            AppError::SettlementFailed { transaction_id, source } => {
                tracing::error!(
                    transaction_id,
                    "settlement failed, rolled back: {}",
                    source
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "settlement_failed", None)
            }
            AppError::Config(e) => {
                tracing::error!("config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
