use chrono::{DateTime, Utc};

/// A stored note row. Notes are immutable after insertion.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
