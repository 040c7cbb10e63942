use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
pub struct SetProduct {
    pub id: i64,
    pub set_id: String,
    pub set_name: String,
    pub product_codes: Vec<String>,
    pub remarks: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
