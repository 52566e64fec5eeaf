//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Kourt API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kourt_core::errors::KourtError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `KourtError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use kourt_api::middleware::error_handling::AppError;
/// use kourt_core::errors::KourtError;
///
/// async fn handler(slots: Vec<String>) -> Result<Json<Vec<String>>, AppError> {
///     if slots.is_empty() {
///         return Err(AppError(KourtError::NotFound("No slots left".to_string())));
///     }
///     Ok(Json(slots))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub KourtError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KourtError::NotFound(_) => StatusCode::NOT_FOUND,
            KourtError::Validation(_) => StatusCode::BAD_REQUEST,
            KourtError::Conflict(_) => StatusCode::CONFLICT,
            KourtError::Authorization(_) => StatusCode::FORBIDDEN,
            KourtError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            KourtError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));

        (status, body).into_response()
    }
}

/// Automatic conversion from KourtError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, KourtError>` in handler functions that return `Result<T, AppError>`.
impl From<KourtError> for AppError {
    fn from(err: KourtError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in a KourtError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(KourtError::Database(err))
    }
}

/// Maps a KourtError to an HTTP response
pub fn map_error(err: KourtError) -> Response {
    AppError(err).into_response()
}
