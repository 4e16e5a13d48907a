//! Handlers for the posts screen and its mutations.

mod errors;
mod forms;
mod handlers;
mod response;

pub(super) use handlers::{create_post, delete_post, list_posts, spoofed_post, update_post};
