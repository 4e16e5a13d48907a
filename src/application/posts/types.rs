use thiserror::Error;

use crate::{application::repos::RepoError, domain::posts::ValidationErrors};

pub const POST_CREATED: &str = "Post created successfully!";
pub const POST_UPDATED: &str = "Post updated successfully!";
pub const POST_DELETED: &str = "Post deleted successfully!";

#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("post `{id}` not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl PostError {
    /// Promote a repository miss on `id` to a typed not-found error.
    pub(crate) fn for_post(id: i64) -> impl FnOnce(RepoError) -> PostError {
        move |err| match err {
            RepoError::NotFound => PostError::NotFound { id },
            other => PostError::Repo(other),
        }
    }
}

/// Raw form input for a new post; validated by the service.
#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
}
