use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

/// A sales plan joined with its channel name and set identifiers.
#[derive(Debug, FromRow)]
pub struct SalesPlanRow {
    pub id: i64,
    pub season: String,
    pub plan_date: NaiveDate,
    pub plan_time: NaiveTime,
    pub channel_id: i64,
    pub channel_code: String,
    pub channel_name: String,
    pub channel_detail: Option<String>,
    pub product_category: String,
    pub product_name: String,
    pub product_summary: Option<String>,
    pub quantity_composition: Option<String>,
    pub set_ref: i64,
    pub set_id: String,
    pub set_name: String,
    pub product_code: String,
    pub sale_price: i64,
    pub commission_rate: i32,
    pub target_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
