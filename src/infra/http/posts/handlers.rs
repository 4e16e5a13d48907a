use std::time::Instant;

use axum::{
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::{
    application::{
        error::{ErrorReport, HttpError},
        posts::{
            CreatePostCommand, POST_CREATED, POST_DELETED, POST_UPDATED, PostError,
            UpdatePostCommand,
        },
        repos::RepoError,
        screen::{PostScreen, ToastKind, UPDATE_FAILED},
    },
    domain::{entities::PostRecord, posts::ValidationErrors},
    infra::http::{HttpState, repo_error_status, repo_error_to_http},
};

use super::errors::post_error_to_http;
use super::forms::{MethodOverride, PostForm, ScreenDialog, ScreenQuery};
use super::response::{
    inertia_response, is_inertia_request, not_found_json, redirect_with_flash, render_screen,
    validation_json, wants_json,
};

const LIST_SOURCE: &str = "infra::http::posts::list_posts";
const CREATE_SOURCE: &str = "infra::http::posts::create_post";
const UPDATE_SOURCE: &str = "infra::http::posts::update_post";
const DELETE_SOURCE: &str = "infra::http::posts::delete_post";
const SPOOF_SOURCE: &str = "infra::http::posts::spoofed_post";

#[derive(Debug, Clone, Copy)]
enum FailedAction {
    Create,
    Update,
    Delete,
}

impl FailedAction {
    fn source(self) -> &'static str {
        match self {
            FailedAction::Create => CREATE_SOURCE,
            FailedAction::Update => UPDATE_SOURCE,
            FailedAction::Delete => DELETE_SOURCE,
        }
    }
}

pub(crate) async fn list_posts(
    State(state): State<HttpState>,
    Query(query): Query<ScreenQuery>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    let posts = match state.posts.list_posts().await {
        Ok(posts) => posts,
        Err(err) => return post_error_to_http(LIST_SOURCE, err).into_response(),
    };

    if is_inertia_request(&headers) {
        let (jar, flash) = state.flash.take(jar);
        return (jar, inertia_response(&posts, &flash)).into_response();
    }

    let mut screen = PostScreen::new(Vec::new());
    match query.dialog() {
        ScreenDialog::Closed => {}
        ScreenDialog::Create => screen.open_create(),
        ScreenDialog::Edit(id) => match find_post(&posts, id) {
            Some(post) => screen.open_edit(post),
            None => return missing_dialog_target(id),
        },
        ScreenDialog::Delete(id) => match find_post(&posts, id) {
            Some(post) => screen.request_delete(post),
            None => return missing_dialog_target(id),
        },
    }

    let now = Instant::now();
    let (jar, flash) = state.flash.take(jar);
    if !flash.is_empty() {
        debug!(
            target = "postboard::http::posts",
            success = flash.success.as_deref().unwrap_or(""),
            error = flash.error.as_deref().unwrap_or(""),
            "consumed flash"
        );
    }
    screen.receive_page(posts, &flash, now);

    (jar, render_screen(&screen, StatusCode::OK, now)).into_response()
}

pub(crate) async fn create_post(
    State(state): State<HttpState>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Response {
    let command = CreatePostCommand {
        title: form.title.clone(),
        content: form.content.clone(),
    };

    match state.posts.create_post(command).await {
        Ok(_) => redirect_with_flash(&state, jar, POST_CREATED),
        Err(PostError::Validation(errors)) if wants_json(&headers) => {
            validation_json(CREATE_SOURCE, &errors)
        }
        Err(PostError::Validation(errors)) => {
            invalid_submit(&state, FailedAction::Create, None, &form, errors).await
        }
        Err(PostError::Repo(err)) => {
            store_failure(&state, &headers, FailedAction::Create, None, Some(&form), err).await
        }
        Err(err) => post_error_to_http(CREATE_SOURCE, err).into_response(),
    }
}

pub(crate) async fn update_post(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Response {
    update(&state, id, &headers, jar, form).await
}

pub(crate) async fn delete_post(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    delete(&state, id, &headers, jar).await
}

/// `POST /posts/{id}` carrying `_method` for clients limited to GET and POST.
pub(crate) async fn spoofed_post(
    State(state): State<HttpState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Response {
    match form.method_override() {
        Some(MethodOverride::Update) => update(&state, id, &headers, jar, form).await,
        Some(MethodOverride::Delete) => delete(&state, id, &headers, jar).await,
        None => HttpError::new(
            SPOOF_SOURCE,
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            format!(
                "unsupported `_method` value `{}`",
                form.method.as_deref().unwrap_or("")
            ),
        )
        .into_response(),
    }
}

async fn update(
    state: &HttpState,
    id: i64,
    headers: &HeaderMap,
    jar: CookieJar,
    form: PostForm,
) -> Response {
    let command = UpdatePostCommand {
        id,
        title: form.title.clone(),
        content: form.content.clone(),
    };

    match state.posts.update_post(command).await {
        Ok(_) => redirect_with_flash(state, jar, POST_UPDATED),
        Err(PostError::Validation(errors)) if wants_json(headers) => {
            validation_json(UPDATE_SOURCE, &errors)
        }
        Err(PostError::Validation(errors)) => match state.posts.load_post(id).await {
            Ok(Some(_)) => {
                invalid_submit(state, FailedAction::Update, Some(id), &form, errors).await
            }
            Ok(None) => not_found(state, headers, FailedAction::Update, id).await,
            Err(err) => post_error_to_http(UPDATE_SOURCE, err).into_response(),
        },
        Err(PostError::NotFound { id }) => {
            not_found(state, headers, FailedAction::Update, id).await
        }
        Err(PostError::Repo(err)) => {
            store_failure(state, headers, FailedAction::Update, Some(id), Some(&form), err).await
        }
    }
}

async fn delete(state: &HttpState, id: i64, headers: &HeaderMap, jar: CookieJar) -> Response {
    match state.posts.delete_post(id).await {
        Ok(()) => redirect_with_flash(state, jar, POST_DELETED),
        Err(PostError::NotFound { id }) => {
            not_found(state, headers, FailedAction::Delete, id).await
        }
        Err(PostError::Repo(err)) => {
            store_failure(state, headers, FailedAction::Delete, Some(id), None, err).await
        }
        Err(err) => post_error_to_http(DELETE_SOURCE, err).into_response(),
    }
}

async fn invalid_submit(
    state: &HttpState,
    action: FailedAction,
    target: Option<i64>,
    form: &PostForm,
    errors: ValidationErrors,
) -> Response {
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    let report = ErrorReport::from_message(action.source(), status, errors.summary());
    render_failure(state, action, target, Some(form), errors, status, report).await
}

async fn not_found(
    state: &HttpState,
    headers: &HeaderMap,
    action: FailedAction,
    id: i64,
) -> Response {
    let source = action.source();
    if wants_json(headers) {
        return not_found_json(source, id);
    }

    let status = StatusCode::NOT_FOUND;
    let report = ErrorReport::from_message(source, status, format!("post `{id}` not found"));
    render_failure(
        state,
        action,
        Some(id),
        None,
        ValidationErrors::new(),
        status,
        report,
    )
    .await
}

/// The store rejected a write. JSON clients get the bare error; the screen gets the action's toast.
async fn store_failure(
    state: &HttpState,
    headers: &HeaderMap,
    action: FailedAction,
    target: Option<i64>,
    form: Option<&PostForm>,
    err: RepoError,
) -> Response {
    let source = action.source();
    if wants_json(headers) {
        return repo_error_to_http(source, err).into_response();
    }

    let status = repo_error_status(&err);
    let report = ErrorReport::from_error(source, status, &err);
    render_failure(
        state,
        action,
        target,
        form,
        ValidationErrors::new(),
        status,
        report,
    )
    .await
}

/// Re-render the screen after a failed action with its static error toast.
///
/// The create/edit dialog reopens with the submitted values and `errors`; a failed delete keeps
/// the confirmation open on its target. A target missing from the listing only raises the toast.
async fn render_failure(
    state: &HttpState,
    action: FailedAction,
    target: Option<i64>,
    form: Option<&PostForm>,
    errors: ValidationErrors,
    status: StatusCode,
    report: ErrorReport,
) -> Response {
    let posts = match state.posts.list_posts().await {
        Ok(posts) => posts,
        Err(err) => return post_error_to_http(action.source(), err).into_response(),
    };

    let now = Instant::now();
    let target = target.and_then(|id| find_post(&posts, id));
    let mut screen = PostScreen::new(posts);

    match (action, target) {
        (FailedAction::Create, _) => {
            screen.open_create();
            resubmit(&mut screen, form, errors, now);
        }
        (FailedAction::Update, Some(post)) => {
            screen.open_edit(post);
            resubmit(&mut screen, form, errors, now);
        }
        (FailedAction::Update, None) => screen.show_toast(ToastKind::Error, UPDATE_FAILED, now),
        (FailedAction::Delete, Some(post)) => {
            screen.request_delete(post);
            if screen.confirm_delete().is_some() {
                screen.delete_failed(now);
            }
        }
        (FailedAction::Delete, None) => screen.delete_failed(now),
    }

    let mut response = render_screen(&screen, status, now);
    report.attach(&mut response);
    response
}

fn resubmit(
    screen: &mut PostScreen,
    form: Option<&PostForm>,
    errors: ValidationErrors,
    now: Instant,
) {
    if let Some(form) = form {
        screen.set_title(form.title.clone().unwrap_or_default());
        screen.set_content(form.content.clone().unwrap_or_default());
    }
    if screen.submit().is_some() {
        screen.submit_failed(errors, now);
    }
}

fn find_post(posts: &[PostRecord], id: i64) -> Option<PostRecord> {
    posts.iter().find(|post| post.id == id).cloned()
}

fn missing_dialog_target(id: i64) -> Response {
    HttpError::new(
        LIST_SOURCE,
        StatusCode::NOT_FOUND,
        "Post not found",
        format!("post `{id}` not found"),
    )
    .into_response()
}
