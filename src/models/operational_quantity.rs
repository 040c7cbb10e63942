use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

pub const QUANTITY_TOO_LARGE: &str = "수량이 너무 큽니다.";

/// One size's share of a set's operational quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeQuantity {
    pub size: String,
    pub quantity: i64,
    pub percent: i64,
}

#[derive(Debug, FromRow)]
pub struct OperationalQuantityRow {
    pub id: Uuid,
    pub set_id: String,
    pub set_name: String,
    pub sizes: Json<Vec<SizeQuantity>>,
    pub total_quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Computes each size's percentage of the total, rounded half up.
/// Returns the breakdown and the total, or a validation error when the total
/// does not fit in an `i64`.
pub fn allocate<I>(sizes: I) -> Result<(Vec<SizeQuantity>, i64), AppError>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let entries: Vec<(String, i64)> = sizes.into_iter().collect();
    let total = entries
        .iter()
        .try_fold(0i64, |acc, (_, q)| acc.checked_add(*q))
        .ok_or_else(|| AppError::validation(QUANTITY_TOO_LARGE))?;

    let breakdown = entries
        .into_iter()
        .map(|(size, quantity)| {
            let percent = if total == 0 {
                0
            } else {
                // i128 keeps quantity * 200 in range; the quotient is at most 100
                let (q, t) = (i128::from(quantity), i128::from(total));
                ((q * 200 + t) / (t * 2)) as i64
            };
            SizeQuantity { size, quantity, percent }
        })
        .collect();

    Ok((breakdown, total))
}
