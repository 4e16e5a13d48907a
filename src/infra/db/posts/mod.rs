mod read;
mod types;
mod write;

/// Column list shared by every statement that returns a full post row.
const POST_COLUMNS: &str = "id, title, content, created_at, updated_at";
