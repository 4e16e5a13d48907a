//! State of the posts screen: which dialog is open, which post is targeted, the form
//! buffer, and the toast lifecycle.
//!
//! Transitions are synchronous and take the current time explicitly, so the toast
//! deadline is deterministic. Requests are returned to the caller instead of being
//! issued here; the caller reports the outcome back through the `*_succeeded` and
//! `*_failed` transitions.

use std::time::{Duration, Instant};

use crate::application::flash::Flash;
use crate::domain::{entities::PostRecord, posts::ValidationErrors};

/// How long a toast stays visible after it was last shown.
pub const TOAST_TTL: Duration = Duration::from_millis(3000);

pub const CREATE_FAILED: &str = "Failed to create post";
pub const UPDATE_FAILED: &str = "Failed to update post";
pub const DELETE_FAILED: &str = "Failed to delete post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A request the screen wants issued against the posts controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Create {
        title: String,
        content: String,
    },
    Update {
        id: i64,
        title: String,
        content: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Clone)]
pub struct PostScreen {
    posts: Vec<PostRecord>,
    dialog_open: bool,
    editing: Option<PostRecord>,
    delete_dialog_open: bool,
    deleting: Option<PostRecord>,
    form: FormBuffer,
    field_errors: ValidationErrors,
    submitting: bool,
    toast: Option<Toast>,
}

impl PostScreen {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self {
            posts,
            dialog_open: false,
            editing: None,
            delete_dialog_open: false,
            deleting: None,
            form: FormBuffer::default(),
            field_errors: ValidationErrors::new(),
            submitting: false,
            toast: None,
        }
    }

    /// Accept a freshly rendered listing together with its flash payload.
    pub fn receive_page(&mut self, posts: Vec<PostRecord>, flash: &Flash, now: Instant) {
        self.posts = posts;
        self.receive_flash(flash, now);
    }

    /// Show a toast for each present key. With both keys set the error is shown last and wins.
    pub fn receive_flash(&mut self, flash: &Flash, now: Instant) {
        if let Some(message) = flash.success.as_deref() {
            self.show_toast(ToastKind::Success, message, now);
        }
        if let Some(message) = flash.error.as_deref() {
            self.show_toast(ToastKind::Error, message, now);
        }
    }

    /// Replace the current toast and re-arm its deadline.
    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            kind,
            message: message.into(),
            expires_at: now + TOAST_TTL,
        });
    }

    /// Advance the clock. Returns `true` when this call dismissed the toast.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.toast {
            Some(toast) if now >= toast.expires_at => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = FormBuffer::default();
        self.field_errors = ValidationErrors::new();
        self.dialog_open = true;
    }

    pub fn open_edit(&mut self, post: PostRecord) {
        self.form = FormBuffer {
            title: post.title.clone(),
            content: post.content.clone().unwrap_or_default(),
        };
        self.editing = Some(post);
        self.field_errors = ValidationErrors::new();
        self.dialog_open = true;
    }

    /// Dismiss the create/edit dialog without touching the buffer.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    /// Returns the request to issue, or `None` while the submit button is disabled.
    pub fn submit(&mut self) -> Option<ScreenRequest> {
        if self.submitting || !self.dialog_open {
            return None;
        }

        self.submitting = true;
        let title = self.form.title.clone();
        let content = self.form.content.clone();

        Some(match &self.editing {
            Some(post) => ScreenRequest::Update {
                id: post.id,
                title,
                content,
            },
            None => ScreenRequest::Create { title, content },
        })
    }

    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        self.dialog_open = false;
        self.form = FormBuffer::default();
        self.field_errors = ValidationErrors::new();
        self.editing = None;
    }

    /// Keep the dialog open with the buffer intact and raise the static error toast.
    pub fn submit_failed(&mut self, errors: ValidationErrors, now: Instant) {
        self.submitting = false;
        self.field_errors = errors;
        let message = match self.form_mode() {
            FormMode::Edit => UPDATE_FAILED,
            FormMode::Create => CREATE_FAILED,
        };
        self.show_toast(ToastKind::Error, message, now);
    }

    pub fn request_delete(&mut self, post: PostRecord) {
        self.deleting = Some(post);
        self.delete_dialog_open = true;
    }

    pub fn confirm_delete(&mut self) -> Option<ScreenRequest> {
        if self.submitting || !self.delete_dialog_open {
            return None;
        }

        let id = self.deleting.as_ref()?.id;
        self.submitting = true;
        Some(ScreenRequest::Delete { id })
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog_open = false;
    }

    pub fn delete_succeeded(&mut self) {
        self.submitting = false;
        self.delete_dialog_open = false;
        self.deleting = None;
    }

    pub fn delete_failed(&mut self, now: Instant) {
        self.submitting = false;
        self.show_toast(ToastKind::Error, DELETE_FAILED, now);
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn find_post(&self, id: i64) -> Option<&PostRecord> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn editing(&self) -> Option<&PostRecord> {
        self.editing.as_ref()
    }

    pub fn form_mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn form(&self) -> &FormBuffer {
        &self.form
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_delete_dialog_open(&self) -> bool {
        self.delete_dialog_open
    }

    pub fn deleting(&self) -> Option<&PostRecord> {
        self.deleting.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }
}
