use std::time::Instant;

use axum::{
    Json,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::{
    application::{error::ErrorReport, flash::Flash, screen::PostScreen},
    domain::{entities::PostRecord, posts::ValidationErrors},
    infra::http::HttpState,
    presentation::{
        posts::{POSTS_TEMPLATE, POSTS_URL, PageObject, PostsPageView, PostsTemplate},
        views::render_page,
    },
};

pub(super) const INERTIA_HEADER: HeaderName = HeaderName::from_static("x-inertia");

pub(super) fn is_inertia_request(headers: &HeaderMap) -> bool {
    headers
        .get(&INERTIA_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}

pub(super) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

/// 303 back to the listing with a success flash.
pub(super) fn redirect_with_flash(state: &HttpState, jar: CookieJar, message: &str) -> Response {
    let jar = state.flash.put(jar, &Flash::success(message));
    (jar, Redirect::to(POSTS_URL)).into_response()
}

pub(super) fn render_screen(screen: &PostScreen, status: StatusCode, now: Instant) -> Response {
    let view = PostsPageView::from_screen(screen, now);
    render_page(POSTS_TEMPLATE, &PostsTemplate { view }, status)
}

pub(super) fn inertia_response(posts: &[PostRecord], flash: &Flash) -> Response {
    (
        [
            (INERTIA_HEADER, "true"),
            (header::VARY, "X-Inertia"),
        ],
        Json(PageObject::posts_index(posts, flash)),
    )
        .into_response()
}

#[derive(Serialize)]
struct ValidationBody<'a> {
    message: String,
    errors: &'a ValidationErrors,
}

pub(super) fn validation_json(source: &'static str, errors: &ValidationErrors) -> Response {
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    let body = ValidationBody {
        message: errors.summary(),
        errors,
    };
    let mut response = (status, Json(body)).into_response();
    ErrorReport::from_message(source, status, errors.summary()).attach(&mut response);
    response
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

pub(super) fn not_found_json(source: &'static str, id: i64) -> Response {
    let status = StatusCode::NOT_FOUND;
    let mut response = (
        status,
        Json(MessageBody {
            message: "Post not found.",
        }),
    )
        .into_response();
    ErrorReport::from_message(source, status, format!("post `{id}` not found"))
        .attach(&mut response);
    response
}
