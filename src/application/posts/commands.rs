use metrics::counter;
use tracing::info;

use crate::application::repos::{CreatePostParams, UpdatePostParams};
use crate::domain::{entities::PostRecord, posts::PostDraft};

use super::service::PostService;
use super::types::{CreatePostCommand, PostError, UpdatePostCommand};

const MUTATIONS_METRIC: &str = "postboard_post_mutations_total";

impl PostService {
    pub async fn create_post(&self, command: CreatePostCommand) -> Result<PostRecord, PostError> {
        let draft = PostDraft::parse(command.title.as_deref(), command.content.as_deref())?;
        let (title, content) = draft.into_parts();

        let post = self
            .writer
            .create_post(CreatePostParams { title, content })
            .await?;

        counter!(MUTATIONS_METRIC, "action" => "create").increment(1);
        info!(
            target = "postboard::posts",
            post_id = post.id,
            title = %post.title,
            "post created"
        );

        Ok(post)
    }

    pub async fn update_post(&self, command: UpdatePostCommand) -> Result<PostRecord, PostError> {
        let draft = PostDraft::parse(command.title.as_deref(), command.content.as_deref())?;
        let (title, content) = draft.into_parts();

        let post = self
            .writer
            .update_post(UpdatePostParams {
                id: command.id,
                title,
                content,
            })
            .await
            .map_err(PostError::for_post(command.id))?;

        counter!(MUTATIONS_METRIC, "action" => "update").increment(1);
        info!(
            target = "postboard::posts",
            post_id = post.id,
            title = %post.title,
            "post updated"
        );

        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), PostError> {
        self.writer
            .delete_post(id)
            .await
            .map_err(PostError::for_post(id))?;

        counter!(MUTATIONS_METRIC, "action" => "delete").increment(1);
        info!(target = "postboard::posts", post_id = id, "post deleted");

        Ok(())
    }
}
