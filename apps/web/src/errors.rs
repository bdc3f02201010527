use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Ресурс не найден!";
pub const SERVER_ERROR_MESSAGE: &str = "Ошибка сервера!";
pub const UNAUTHORIZED_MESSAGE: &str = "Требуется авторизация!";
pub const FORBIDDEN_MESSAGE: &str = "Доступ запрещён!";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Form validation failures are not errors: handlers re-render the bound form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {what}");
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()).into_response(),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE).into_response()
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_MESSAGE).into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                server_error_response()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e:#}");
                server_error_response()
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                server_error_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                server_error_response()
            }
        }
    }
}

/// The fixed 500 page, shared with the panic handler.
pub fn server_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
}
