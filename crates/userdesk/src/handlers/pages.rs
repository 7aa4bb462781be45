use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// Static landing page.
#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {}

/// Error page shown for failed requests.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    status: u16,
    reason: &'static str,
    message: String,
}

impl ErrorTemplate {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message: message.into(),
        }
    }
}

/// Handler for the landing page (GET /).
pub async fn index() -> impl IntoResponse {
    HtmlTemplate(HomeTemplate {})
}
