use std::sync::Arc;

use crate::application::{
    posts::PostService,
    repos::{HealthRepo, PostsRepo, PostsWriteRepo},
};

use super::flash::FlashCookie;

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub health: Arc<dyn HealthRepo>,
    pub flash: FlashCookie,
}

impl HttpState {
    /// Wire every service against one store that implements all repository traits.
    pub fn from_repositories<R>(repos: Arc<R>, flash: FlashCookie) -> Self
    where
        R: PostsRepo + PostsWriteRepo + HealthRepo + 'static,
    {
        let reader: Arc<dyn PostsRepo> = repos.clone();
        let writer: Arc<dyn PostsWriteRepo> = repos.clone();
        let health: Arc<dyn HealthRepo> = repos;

        Self {
            posts: Arc::new(PostService::new(reader, writer)),
            health,
            flash,
        }
    }
}
