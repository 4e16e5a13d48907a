use crate::domain::entities::PostRecord;

use super::service::PostService;
use super::types::PostError;

impl PostService {
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>, PostError> {
        self.reader.list_posts().await.map_err(PostError::from)
    }

    pub async fn load_post(&self, id: i64) -> Result<Option<PostRecord>, PostError> {
        self.reader.find_by_id(id).await.map_err(PostError::from)
    }
}
