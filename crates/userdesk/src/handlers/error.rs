use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use userdesk_core::storage::{repository_error_to_status_code, RepositoryError};

use super::pages::{ErrorTemplate, HtmlTemplate};

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on repository calls inside handlers. Repository
/// errors and path rejections pick their own status code; anything else is
/// a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<PathRejection>() {
            return rejection.status();
        }

        self.0
            .downcast_ref::<RepositoryError>()
            .map(repository_error_to_status_code)
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures get a generic page; details stay in the logs.
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, status = %status, "Application error");
            "Something went wrong. Please try again later.".to_string()
        } else {
            tracing::warn!(error = %self.0, status = %status, "Request failed");
            self.0.to_string()
        };

        (status, HtmlTemplate(ErrorTemplate::new(status, message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
