use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::format;
use crate::models::sales_plan::SalesPlanRow;
use crate::models::season::{sanitize_year, Season, INVALID_SEASON};

/// Body of `POST /sales/plans` and `PUT /sales/plans/{id}`.
///
/// Everything the form might leave empty is optional here so a missing field
/// is reported with the form's own message rather than a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SalesPlanRequest {
    /// Composite code such as `24SS`. When blank, `season_year` and
    /// `season_type` are combined instead.
    pub season: String,
    pub season_year: Option<String>,
    pub season_type: Option<String>,
    pub plan_date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_plan_time")]
    pub plan_time: Option<NaiveTime>,
    pub channel_id: Option<i64>,
    pub channel_detail: Option<String>,
    pub product_category: String,
    pub product_name: String,
    pub product_summary: Option<String>,
    pub quantity_composition: Option<String>,
    pub set_id: Option<i64>,
    pub product_code: String,
    #[serde(deserialize_with = "format::de_amount")]
    pub sale_price: i64,
    #[serde(deserialize_with = "format::de_amount")]
    pub commission_rate: i64,
    #[serde(deserialize_with = "format::de_amount")]
    pub target_quantity: i64,
}

/// A request that passed validation, with optional text normalized.
#[derive(Debug)]
pub struct ValidPlan {
    pub season: Season,
    pub plan_date: NaiveDate,
    pub plan_time: NaiveTime,
    pub channel_id: i64,
    pub channel_detail: Option<String>,
    pub product_category: String,
    pub product_name: String,
    pub product_summary: Option<String>,
    pub quantity_composition: Option<String>,
    pub set_id: i64,
    pub product_code: String,
    pub sale_price: i64,
    pub commission_rate: i32,
    pub target_quantity: i64,
}

fn required<T>(value: Option<T>, message: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(message))
}

fn required_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SalesPlanRequest {
    fn season(&self) -> Result<Season, AppError> {
        if !self.season.trim().is_empty() {
            return self.season.parse();
        }
        match (&self.season_year, &self.season_type) {
            (Some(year), Some(kind)) => Season::new(&sanitize_year(year), kind.trim().parse()?),
            _ => Err(AppError::validation(INVALID_SEASON)),
        }
    }

    /// Checks fields in the order the registration form does and reports the
    /// first failure.
    pub fn validate(self) -> Result<ValidPlan, AppError> {
        let plan_date = required(self.plan_date, "날짜를 선택해주세요.")?;
        let plan_time = required(self.plan_time, "시간을 선택해주세요.")?;
        let channel_id = required(self.channel_id, "판매채널을 선택해주세요.")?;
        let product_category = required_text(&self.product_category, "카테고리를 선택해주세요.")?;
        let product_name = required_text(&self.product_name, "상품명을 입력해주세요.")?;
        let set_id = required(self.set_id, "세트품번을 입력해주세요.")?;
        let product_code = required_text(&self.product_code, "상품코드를 입력해주세요.")?;
        let season = self.season()?;

        let commission_rate = i32::try_from(self.commission_rate)
            .ok()
            .filter(|rate| *rate <= format::MAX_COMMISSION_RATE as i32)
            .ok_or_else(|| AppError::validation("수수료율은 100을 넘을 수 없습니다."))?;

        Ok(ValidPlan {
            season,
            plan_date,
            plan_time,
            channel_id,
            channel_detail: optional_text(self.channel_detail),
            product_category,
            product_name,
            product_summary: optional_text(self.product_summary),
            quantity_composition: optional_text(self.quantity_composition),
            set_id,
            product_code,
            sale_price: self.sale_price,
            commission_rate,
            target_quantity: self.target_quantity,
        })
    }
}

/// Accepts `HH:mm:ss` as sent by the form, or `HH:mm`.
fn de_plan_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanListQuery {
    pub season: Option<String>,
    pub channel_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 200;

impl PlanListQuery {
    /// `(limit, offset)` for the requested page; pages are 1-based.
    pub fn window(&self) -> (i64, i64) {
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        let page = self.page.unwrap_or(1).max(1);
        (i64::from(per_page), i64::from(page - 1) * i64::from(per_page))
    }
}

#[derive(Debug, Serialize)]
pub struct SetInfo {
    pub id: i64,
    pub set_id: String,
    pub set_name: String,
}

#[derive(Debug, Serialize)]
pub struct SalesPlanResponse {
    pub id: i64,
    pub season: String,
    pub plan_date: NaiveDate,
    pub plan_time: String,
    pub channel_id: i64,
    pub channel_code: String,
    pub channel_name: String,
    pub channel_detail: Option<String>,
    pub product_category: String,
    pub product_name: String,
    pub product_summary: Option<String>,
    pub quantity_composition: Option<String>,
    pub set_info: SetInfo,
    pub product_code: String,
    pub sale_price: i64,
    pub sale_price_display: String,
    pub commission_rate: i32,
    pub commission_rate_display: String,
    pub target_quantity: i64,
    pub target_quantity_display: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SalesPlanRow> for SalesPlanResponse {
    fn from(row: SalesPlanRow) -> Self {
        Self {
            id: row.id,
            season: row.season,
            plan_date: row.plan_date,
            plan_time: row.plan_time.format("%H:%M:%S").to_string(),
            channel_id: row.channel_id,
            channel_code: row.channel_code,
            channel_name: row.channel_name,
            channel_detail: row.channel_detail,
            product_category: row.product_category,
            product_name: row.product_name,
            product_summary: row.product_summary,
            quantity_composition: row.quantity_composition,
            set_info: SetInfo {
                id: row.set_ref,
                set_id: row.set_id,
                set_name: row.set_name,
            },
            product_code: row.product_code,
            sale_price: row.sale_price,
            sale_price_display: format::price(&row.sale_price.to_string(), false),
            commission_rate: row.commission_rate,
            commission_rate_display: format::commission_rate(&row.commission_rate.to_string(), false),
            target_quantity: row.target_quantity,
            target_quantity_display: format::target(&row.target_quantity.to_string(), false),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> serde_json::Value {
        json!({
            "season": "24SS",
            "plan_date": "2024-05-01",
            "plan_time": "20:30:00",
            "channel_id": 3,
            "channel_code": "HS",
            "channel_detail": "",
            "product_category": "아우터",
            "product_name": "경량 패딩 3종",
            "product_summary": "패딩",
            "quantity_composition": "",
            "set_id": 7,
            "product_code": "P-1001",
            "sale_price": 15000,
            "commission_rate": 30,
            "target_quantity": "1,200개"
        })
    }

    fn parse(value: serde_json::Value) -> SalesPlanRequest {
        serde_json::from_value(value).unwrap()
    }

    fn message_without(field: &str) -> String {
        let mut body = complete();
        body.as_object_mut().unwrap().remove(field);
        parse(body).validate().unwrap_err().message().to_string()
    }

    #[test]
    fn complete_request_validates() {
        let plan = parse(complete()).validate().unwrap();
        assert_eq!(plan.season.to_string(), "24SS");
        assert_eq!(plan.plan_time, NaiveTime::from_hms_opt(20, 30, 0).unwrap());
        assert_eq!(plan.channel_detail, None);
        assert_eq!(plan.quantity_composition, None);
        assert_eq!(plan.product_summary.as_deref(), Some("패딩"));
        assert_eq!(plan.target_quantity, 1200);
        assert_eq!(plan.commission_rate, 30);
    }

    #[test]
    fn missing_fields_report_form_messages() {
        assert_eq!(message_without("plan_date"), "날짜를 선택해주세요.");
        assert_eq!(message_without("plan_time"), "시간을 선택해주세요.");
        assert_eq!(message_without("channel_id"), "판매채널을 선택해주세요.");
        assert_eq!(message_without("product_category"), "카테고리를 선택해주세요.");
        assert_eq!(message_without("product_name"), "상품명을 입력해주세요.");
        assert_eq!(message_without("set_id"), "세트품번을 입력해주세요.");
        assert_eq!(message_without("product_code"), "상품코드를 입력해주세요.");
        assert_eq!(message_without("season"), "시즌 정보가 올바르지 않습니다.");
    }

    #[test]
    fn first_failure_wins() {
        let err = parse(json!({})).validate().unwrap_err();
        assert_eq!(err.message(), "날짜를 선택해주세요.");
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let mut body = complete();
        body["product_name"] = json!("   ");
        let err = parse(body).validate().unwrap_err();
        assert_eq!(err.message(), "상품명을 입력해주세요.");
    }

    #[test]
    fn commission_above_cap_is_rejected() {
        let mut body = complete();
        body["commission_rate"] = json!("150%");
        let err = parse(body).validate().unwrap_err();
        assert_eq!(err.message(), "수수료율은 100을 넘을 수 없습니다.");
    }

    #[test]
    fn season_can_come_from_separate_inputs() {
        let mut body = complete();
        body["season"] = json!("");
        body["season_year"] = json!("2025");
        body["season_type"] = json!("FW");
        let plan = parse(body).validate().unwrap();
        assert_eq!(plan.season.to_string(), "20FW");
    }

    #[test]
    fn plan_time_accepts_minutes_only() {
        let mut body = complete();
        body["plan_time"] = json!("09:00");
        let plan = parse(body).validate().unwrap();
        assert_eq!(plan.plan_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn page_window_is_clamped() {
        let query = PlanListQuery { page: Some(3), per_page: Some(20), ..Default::default() };
        assert_eq!(query.window(), (20, 40));

        let query = PlanListQuery { page: Some(0), per_page: Some(10_000), ..Default::default() };
        assert_eq!(query.window(), (i64::from(MAX_PER_PAGE), 0));

        assert_eq!(PlanListQuery::default().window(), (i64::from(DEFAULT_PER_PAGE), 0));
    }

    #[test]
    fn response_formats_amounts() {
        let row = SalesPlanRow {
            id: 1,
            season: "24SS".into(),
            plan_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            plan_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            channel_id: 3,
            channel_code: "HS".into(),
            channel_name: "홈쇼핑".into(),
            channel_detail: None,
            product_category: "아우터".into(),
            product_name: "경량 패딩 3종".into(),
            product_summary: None,
            quantity_composition: None,
            set_ref: 7,
            set_id: "SET-007".into(),
            set_name: "패딩 세트".into(),
            product_code: "P-1001".into(),
            sale_price: 15000,
            commission_rate: 30,
            target_quantity: 1200,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let resp = SalesPlanResponse::from(row);
        assert_eq!(resp.sale_price_display, "15,000원");
        assert_eq!(resp.commission_rate_display, "30%");
        assert_eq!(resp.target_quantity_display, "1,200개");
        assert_eq!(resp.plan_time, "20:30:00");
        assert_eq!(resp.set_info.set_id, "SET-007");
    }
}
