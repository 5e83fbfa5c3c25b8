use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_i18n::t;
use serde_json::json;

/// Expected, locally-recoverable error conditions surfaced to API clients.
/// Only `Internal` represents a genuine fault.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    /// Carries the i18n key for the missing resource, e.g. `"error.user_not_found"`.
    NotFound(&'static str),
    CompetitionClosed,
    AlreadyAnswered,
    AlreadyShared,
    InvalidCredentials,
    /// Carries the i18n key for the validation message.
    Input(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, key) = match self {
            AppError::Internal(context) => {
                tracing::error!("internal error: {context}");
                (StatusCode::INTERNAL_SERVER_ERROR, "error.internal")
            }
            AppError::NotFound(key) => (StatusCode::NOT_FOUND, key),
            AppError::CompetitionClosed => (StatusCode::BAD_REQUEST, "error.competition_closed"),
            AppError::AlreadyAnswered => (StatusCode::BAD_REQUEST, "error.already_answered"),
            AppError::AlreadyShared => (StatusCode::BAD_REQUEST, "error.already_shared"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "error.invalid_credentials"),
            AppError::Input(key) => (StatusCode::BAD_REQUEST, key),
        };

        let message = t!(key).to_string();
        (code, Json(json!({ "error": message }))).into_response()
    }
}

/// Converts database-layer errors into `AppError::Internal`, logging the cause.
pub trait ResultExt<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            AppError::Internal(context)
        })
    }
}
