//! In-process post store used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::application::repos::{
    CreatePostParams, HealthRepo, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::PostRecord;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    posts: BTreeMap<i64, PostRecord>,
}

/// Posts kept in a map keyed by id. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryRepositories {
    state: RwLock<MemoryState>,
}

impl Default for MemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepositories {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                posts: BTreeMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PostsRepo for MemoryRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PostRecord>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let now = OffsetDateTime::now_utc();
        let post = PostRecord {
            id,
            title: params.title,
            content: params.content,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut state = self.state.write().await;
        let post = state.posts.get_mut(&params.id).ok_or(RepoError::NotFound)?;

        post.title = params.title;
        post.content = params.content;
        post.updated_at = OffsetDateTime::now_utc();
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl HealthRepo for MemoryRepositories {
    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
