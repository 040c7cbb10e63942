use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format;
use crate::models::operational_quantity::{OperationalQuantityRow, SizeQuantity};

#[derive(Debug, Deserialize)]
pub struct SizeInput {
    pub size: String,
    #[serde(deserialize_with = "format::de_amount")]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOperationalQuantityRequest {
    #[serde(default)]
    pub set_id: String,
    #[serde(default)]
    pub sizes: Vec<SizeInput>,
}

#[derive(Debug, Serialize)]
pub struct OperationalQuantityResponse {
    pub id: Uuid,
    pub set_id: String,
    pub set_name: String,
    pub sizes: Vec<SizeQuantity>,
    pub total_quantity: i64,
    pub total_quantity_display: String,
    pub created_at: DateTime<Utc>,
    pub created_date: String,
    pub created_time: String,
}

impl From<OperationalQuantityRow> for OperationalQuantityResponse {
    fn from(row: OperationalQuantityRow) -> Self {
        Self {
            id: row.id,
            set_id: row.set_id,
            set_name: row.set_name,
            sizes: row.sizes.0,
            total_quantity: row.total_quantity,
            total_quantity_display: format::quantity(row.total_quantity),
            created_date: format::display_date(row.created_at),
            created_time: format::display_time(row.created_at),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::types::Json;

    #[test]
    fn response_carries_display_fields() {
        let row = OperationalQuantityRow {
            id: Uuid::nil(),
            set_id: "SET-001".into(),
            set_name: "기본 세트".into(),
            sizes: Json(vec![SizeQuantity { size: "M".into(), quantity: 1200, percent: 100 }]),
            total_quantity: 1200,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        };
        let resp = OperationalQuantityResponse::from(row);
        assert_eq!(resp.created_date, "2024-03-05");
        assert_eq!(resp.created_time, "23:07");
        assert_eq!(resp.total_quantity_display, "1,200");
        assert_eq!(resp.sizes.len(), 1);
    }

    #[test]
    fn size_quantities_accept_formatted_strings() {
        let req: CreateOperationalQuantityRequest = serde_json::from_str(
            r#"{"set_id":"SET-001","sizes":[{"size":"S","quantity":"1,000개"},{"size":"M","quantity":250}]}"#,
        )
        .unwrap();
        assert_eq!(req.sizes[0].quantity, 1000);
        assert_eq!(req.sizes[1].quantity, 250);
    }
}
