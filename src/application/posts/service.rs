use std::sync::Arc;

use crate::application::repos::{PostsRepo, PostsWriteRepo};

#[derive(Clone)]
pub struct PostService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
}

impl PostService {
    pub fn new(reader: Arc<dyn PostsRepo>, writer: Arc<dyn PostsWriteRepo>) -> Self {
        Self { reader, writer }
    }
}
