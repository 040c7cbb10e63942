use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
pub struct SalesChannel {
    pub id: i64,
    pub channel_code: String,
    pub channel_name: String,
    pub channel_details: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SalesChannel {
    /// Empty detail means "none chosen" and is always accepted.
    pub fn allows_detail(&self, detail: &str) -> bool {
        detail.is_empty() || self.channel_details.iter().any(|d| d == detail)
    }
}
