use axum::http::StatusCode;

use crate::application::{error::HttpError, posts::PostError};
use crate::infra::http::repo_error_to_http;

pub(super) fn post_error_to_http(source: &'static str, err: PostError) -> HttpError {
    match err {
        PostError::Validation(errors) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "The given data was invalid.",
            errors.summary(),
        ),
        PostError::NotFound { id } => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            format!("post `{id}` not found"),
        ),
        PostError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
