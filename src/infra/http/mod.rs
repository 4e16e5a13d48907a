mod flash;
mod health;
mod middleware;
mod posts;
mod state;

pub use flash::FlashCookie;
pub use middleware::{REQUEST_ID_HEADER, RequestContext};
pub use state::HttpState;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, put},
};

use crate::application::error::{ErrorReport, HttpError};
use crate::application::repos::RepoError;
use crate::infra::assets;
use crate::presentation::posts::POSTS_URL;

use self::middleware::{log_responses, set_request_context};

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route(
            POSTS_URL,
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/posts/{id}",
            put(posts::update_post)
                .patch(posts::update_post)
                .delete(posts::delete_post)
                .post(posts::spoofed_post),
        )
        .route("/_health/db", get(health::db_health))
        .route("/static/{*path}", get(assets::serve_static_asset))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn root_redirect() -> Redirect {
    Redirect::to(POSTS_URL)
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Status a repository failure surfaces as, whatever the response body.
pub fn repo_error_status(err: &RepoError) -> StatusCode {
    match err {
        RepoError::NotFound => StatusCode::NOT_FOUND,
        RepoError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        RepoError::Integrity { .. } => StatusCode::CONFLICT,
        RepoError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
        RepoError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a repository error to a consistent HTTP error response.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    let status = repo_error_status(&err);
    match err {
        RepoError::NotFound => {
            HttpError::new(source, status, "Resource not found", "resource not found")
        }
        RepoError::InvalidInput { message } => {
            HttpError::new(source, status, "Invalid input", message)
        }
        RepoError::Integrity { message } => {
            HttpError::new(source, status, "Integrity constraint violated", message)
        }
        RepoError::Timeout => {
            HttpError::new(source, status, "Database timeout", "Database timeout")
        }
        RepoError::Persistence(message) => {
            HttpError::new(source, status, "Persistence error", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_statuses() {
        let cases = [
            (RepoError::NotFound, StatusCode::NOT_FOUND),
            (RepoError::Timeout, StatusCode::SERVICE_UNAVAILABLE),
            (
                RepoError::Persistence("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RepoError::InvalidInput {
                    message: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                RepoError::Integrity {
                    message: "violates check constraint".into(),
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(repo_error_status(&err), expected);
            assert_eq!(repo_error_to_http("test", err).status(), expected);
        }
    }

    #[test]
    fn failed_health_check_is_unavailable() {
        let response = db_health_response(Err(RepoError::Timeout));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
