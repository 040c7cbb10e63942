use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}
