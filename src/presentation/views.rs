//! Askama rendering into HTTP responses.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::HttpError;

const RENDER_SOURCE: &str = "presentation::views::render_page";

/// A page template failed to render; surfaced as a 500 with the askama error as its cause.
#[derive(Debug, Error)]
#[error("failed to render `{page}`")]
pub struct TemplateRenderError {
    page: &'static str,
    #[source]
    error: askama::Error,
}

impl TemplateRenderError {
    pub fn new(page: &'static str, error: askama::Error) -> Self {
        Self { page, error }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        HttpError::from_error(
            RENDER_SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Template rendering failed",
            &err,
        )
    }
}

/// Render `template` as the HTML body of a response with `status`.
pub fn render_page<T: Template>(page: &'static str, template: &T, status: StatusCode) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(error) => HttpError::from(TemplateRenderError::new(page, error)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::error::ErrorReport;

    #[test]
    fn render_failure_is_a_server_error_with_cause() {
        let err = TemplateRenderError::new("posts/index.html", askama::Error::Fmt);
        assert_eq!(err.to_string(), "failed to render `posts/index.html`");

        let response = HttpError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(report.source, RENDER_SOURCE);
        assert_eq!(report.messages.len(), 2);
    }
}
