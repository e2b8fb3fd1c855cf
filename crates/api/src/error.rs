use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use glucolog_core::error::CoreError;
use glucolog_core::store::StoreError;
use serde_json::json;

use crate::auth::google::GoogleAuthError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence,
/// and adds HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `glucolog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A reading store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The Google OAuth exchange failed.
    #[error(transparent)]
    OAuth(#[from] GoogleAuthError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Configuration(msg) => {
                    tracing::warn!(error = %msg, "Configuration error");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "NOT_CONFIGURED",
                        msg.clone(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => match err {
                StoreError::Unavailable(msg) => {
                    tracing::error!(error = %msg, "Reading store unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "Reading storage is temporarily unavailable".to_string(),
                    )
                }
                StoreError::Corrupt(msg) | StoreError::Backend(msg) => {
                    tracing::error!(error = %msg, "Reading store error");
                    internal()
                }
            },

            // --- Identity provider errors ---
            AppError::OAuth(err) => match err {
                GoogleAuthError::UnverifiedEmail(_) | GoogleAuthError::MissingEmail => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    err.to_string(),
                ),
                GoogleAuthError::InvalidUrl(msg) => {
                    tracing::error!(error = %msg, "OAuth endpoint misconfigured");
                    internal()
                }
                GoogleAuthError::Request(_) | GoogleAuthError::Provider { .. } => {
                    tracing::error!(error = %err, "Google sign-in exchange failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "IDENTITY_PROVIDER_ERROR",
                        "Google sign-in failed".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
