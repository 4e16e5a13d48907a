//! Domain entities mirrored from persistent storage.

use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
