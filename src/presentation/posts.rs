//! View models for the posts screen, derived from [`PostScreen`] state.

use std::time::Instant;

use askama::Template;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::application::{
    flash::Flash,
    screen::{FormMode, PostScreen, Toast},
};
use crate::domain::{
    entities::PostRecord,
    posts::{CONTENT_FIELD, TITLE_FIELD, TITLE_MAX_CHARS},
};

pub const POSTS_COMPONENT: &str = "posts/index";
pub const POSTS_URL: &str = "/posts";
pub const POSTS_TEMPLATE: &str = "posts/index.html";

#[derive(Clone)]
pub struct PostRowView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub edit_href: String,
    pub delete_href: String,
}

#[derive(Clone)]
pub struct ToastView {
    pub kind: &'static str,
    pub message: String,
    pub ttl_ms: u64,
}

#[derive(Clone)]
pub struct FormDialogView {
    pub heading: &'static str,
    pub action: String,
    /// Value for the `_method` field; `None` submits a plain POST.
    pub method_override: Option<&'static str>,
    pub submit_label: &'static str,
    pub title: String,
    pub content: String,
    pub title_max: usize,
    pub title_error: Option<String>,
    pub content_error: Option<String>,
    pub submitting: bool,
}

#[derive(Clone)]
pub struct DeleteDialogView {
    pub title: String,
    pub action: String,
    pub submitting: bool,
}

#[derive(Clone)]
pub struct PostsPageView {
    pub heading: &'static str,
    pub new_post_href: &'static str,
    pub close_href: &'static str,
    pub posts: Vec<PostRowView>,
    pub toast: Option<ToastView>,
    pub form_dialog: Option<FormDialogView>,
    pub delete_dialog: Option<DeleteDialogView>,
}

impl PostsPageView {
    pub fn from_screen(screen: &PostScreen, now: Instant) -> Self {
        let posts = screen.posts().iter().map(build_row).collect();
        let toast = screen.toast().map(|toast| build_toast(toast, now));

        let form_dialog = screen.is_dialog_open().then(|| build_form_dialog(screen));
        let delete_dialog = if screen.is_delete_dialog_open() {
            screen.deleting().map(|post| DeleteDialogView {
                title: post.title.clone(),
                action: format!("{POSTS_URL}/{}", post.id),
                submitting: screen.is_submitting(),
            })
        } else {
            None
        };

        Self {
            heading: "Posts",
            new_post_href: "/posts?dialog=create",
            close_href: POSTS_URL,
            posts,
            toast,
            form_dialog,
            delete_dialog,
        }
    }

    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }
}

fn build_row(post: &PostRecord) -> PostRowView {
    PostRowView {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone().unwrap_or_default(),
        edit_href: format!("{POSTS_URL}?edit={}", post.id),
        delete_href: format!("{POSTS_URL}?delete={}", post.id),
    }
}

fn build_toast(toast: &Toast, now: Instant) -> ToastView {
    let ttl_ms = u64::try_from(toast.remaining(now).as_millis()).unwrap_or(u64::MAX);
    ToastView {
        kind: toast.kind.as_str(),
        message: toast.message.clone(),
        ttl_ms,
    }
}

fn build_form_dialog(screen: &PostScreen) -> FormDialogView {
    let form = screen.form();
    let errors = screen.field_errors();
    let title_error = errors.first(TITLE_FIELD).map(str::to_string);
    let content_error = errors.first(CONTENT_FIELD).map(str::to_string);

    match (screen.form_mode(), screen.editing()) {
        (FormMode::Edit, Some(post)) => FormDialogView {
            heading: "Edit Post",
            action: format!("{POSTS_URL}/{}", post.id),
            method_override: Some("PUT"),
            submit_label: "Update Post",
            title: form.title.clone(),
            content: form.content.clone(),
            title_max: TITLE_MAX_CHARS,
            title_error,
            content_error,
            submitting: screen.is_submitting(),
        },
        _ => FormDialogView {
            heading: "Create a New Post",
            action: POSTS_URL.to_string(),
            method_override: None,
            submit_label: "Create",
            title: form.title.clone(),
            content: form.content.clone(),
            title_max: TITLE_MAX_CHARS,
            title_error,
            content_error,
            submitting: screen.is_submitting(),
        },
    }
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostsTemplate {
    pub view: PostsPageView,
}

/// JSON page object answered to `X-Inertia` requests.
#[derive(Debug, Serialize)]
pub struct PageObject<'a> {
    pub component: &'static str,
    pub props: PageProps<'a>,
    pub url: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PageProps<'a> {
    pub posts: Vec<PostJson<'a>>,
    pub flash: &'a Flash,
}

#[derive(Debug, Serialize)]
pub struct PostJson<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub created_at: String,
    pub updated_at: String,
}

impl<'a> From<&'a PostRecord> for PostJson<'a> {
    fn from(post: &'a PostRecord) -> Self {
        Self {
            id: post.id,
            title: &post.title,
            content: post.content.as_deref(),
            created_at: post.created_at.format(&Rfc3339).unwrap_or_default(),
            updated_at: post.updated_at.format(&Rfc3339).unwrap_or_default(),
        }
    }
}

impl<'a> PageObject<'a> {
    pub fn posts_index(posts: &'a [PostRecord], flash: &'a Flash) -> Self {
        Self {
            component: POSTS_COMPONENT,
            props: PageProps {
                posts: posts.iter().map(PostJson::from).collect(),
                flash,
            },
            url: POSTS_URL,
        }
    }
}
