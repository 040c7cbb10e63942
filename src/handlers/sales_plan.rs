// src/handlers/sales_plan.rs
use axum::{extract::State, http::StatusCode, Json};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, instrument};

use crate::dtos::common::{DataResponse, DeleteResponse};
use crate::dtos::sales_plan::{PlanListQuery, SalesPlanRequest, SalesPlanResponse, ValidPlan};
use crate::error::{server_error, AppError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::channel::SalesChannel;
use crate::models::sales_plan::SalesPlanRow;
use crate::state::AppState;

const PLAN_FAILED: &str = "판매계획 처리 중 오류가 발생했습니다.";
const PLAN_NOT_FOUND: &str = "판매계획을 찾을 수 없습니다.";

const PLAN_SELECT: &str = "SELECT p.id, p.season, p.plan_date, p.plan_time,
            p.channel_id, p.channel_code, c.channel_name, p.channel_detail,
            p.product_category, p.product_name, p.product_summary, p.quantity_composition,
            p.set_id AS set_ref, s.set_id, s.set_name,
            p.product_code, p.sale_price, p.commission_rate, p.target_quantity,
            p.created_at, p.updated_at
     FROM sales_plans p
     JOIN sales_channels c ON c.id = p.channel_id
     JOIN set_products s ON s.id = p.set_id";

// GET /sales/plans
#[instrument(skip(db_pool))]
pub async fn list_plans(
    State(AppState { db_pool, .. }): State<AppState>,
    AppQuery(query): AppQuery<PlanListQuery>,
) -> Result<Json<DataResponse<Vec<SalesPlanResponse>>>, AppError> {
    let (limit, offset) = query.window();

    let mut builder = QueryBuilder::<Postgres>::new(PLAN_SELECT);
    builder.push(" WHERE TRUE");
    if let Some(season) = query.season.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND p.season = ").push_bind(season.to_string());
    }
    if let Some(channel_id) = query.channel_id {
        builder.push(" AND p.channel_id = ").push_bind(channel_id);
    }
    if let Some(from) = query.from {
        builder.push(" AND p.plan_date >= ").push_bind(from);
    }
    if let Some(to) = query.to {
        builder.push(" AND p.plan_date <= ").push_bind(to);
    }
    builder
        .push(" ORDER BY p.plan_date, p.plan_time, p.id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = builder
        .build_query_as::<SalesPlanRow>()
        .fetch_all(&db_pool)
        .await
        .map_err(server_error(PLAN_FAILED))?;

    Ok(Json(DataResponse::new(
        rows.into_iter().map(SalesPlanResponse::from).collect(),
    )))
}

// GET /sales/plans/{id}
#[instrument(skip(db_pool))]
pub async fn get_plan(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DataResponse<SalesPlanResponse>>, AppError> {
    let plan = fetch_plan(&db_pool, id).await?;
    Ok(Json(DataResponse::new(plan)))
}

// POST /sales/plans
#[instrument(skip(db_pool, payload))]
pub async fn create_plan(
    State(AppState { db_pool, .. }): State<AppState>,
    AppJson(payload): AppJson<SalesPlanRequest>,
) -> Result<(StatusCode, Json<DataResponse<SalesPlanResponse>>), AppError> {
    let plan = payload.validate()?;
    let channel = resolve_references(&db_pool, &plan).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO sales_plans (
            season, plan_date, plan_time, channel_id, channel_code, channel_detail,
            product_category, product_name, product_summary, quantity_composition,
            set_id, product_code, sale_price, commission_rate, target_quantity)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING id",
    )
    .bind(plan.season.to_string())
    .bind(plan.plan_date)
    .bind(plan.plan_time)
    .bind(plan.channel_id)
    .bind(&channel.channel_code)
    .bind(&plan.channel_detail)
    .bind(&plan.product_category)
    .bind(&plan.product_name)
    .bind(&plan.product_summary)
    .bind(&plan.quantity_composition)
    .bind(plan.set_id)
    .bind(&plan.product_code)
    .bind(plan.sale_price)
    .bind(plan.commission_rate)
    .bind(plan.target_quantity)
    .fetch_one(&db_pool)
    .await
    .map_err(server_error(PLAN_FAILED))?;

    info!(id, season = %plan.season, "Registered sales plan");
    let created = fetch_plan(&db_pool, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

// PUT /sales/plans/{id} - full replacement
#[instrument(skip(db_pool, payload))]
pub async fn update_plan(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<SalesPlanRequest>,
) -> Result<Json<DataResponse<SalesPlanResponse>>, AppError> {
    let plan = payload.validate()?;
    let channel = resolve_references(&db_pool, &plan).await?;

    sqlx::query_scalar::<_, i64>(
        "UPDATE sales_plans SET
            season = $1, plan_date = $2, plan_time = $3,
            channel_id = $4, channel_code = $5, channel_detail = $6,
            product_category = $7, product_name = $8, product_summary = $9,
            quantity_composition = $10, set_id = $11, product_code = $12,
            sale_price = $13, commission_rate = $14, target_quantity = $15,
            updated_at = NOW()
         WHERE id = $16
         RETURNING id",
    )
    .bind(plan.season.to_string())
    .bind(plan.plan_date)
    .bind(plan.plan_time)
    .bind(plan.channel_id)
    .bind(&channel.channel_code)
    .bind(&plan.channel_detail)
    .bind(&plan.product_category)
    .bind(&plan.product_name)
    .bind(&plan.product_summary)
    .bind(&plan.quantity_composition)
    .bind(plan.set_id)
    .bind(&plan.product_code)
    .bind(plan.sale_price)
    .bind(plan.commission_rate)
    .bind(plan.target_quantity)
    .bind(id)
    .fetch_optional(&db_pool)
    .await
    .map_err(server_error(PLAN_FAILED))?
    .ok_or_else(|| AppError::not_found(PLAN_NOT_FOUND))?;

    info!(id, "Updated sales plan");
    let updated = fetch_plan(&db_pool, id).await?;
    Ok(Json(DataResponse::new(updated)))
}

// DELETE /sales/plans/{id}
#[instrument(skip(db_pool))]
pub async fn delete_plan(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let result = sqlx::query("DELETE FROM sales_plans WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
        .map_err(server_error(PLAN_FAILED))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(PLAN_NOT_FOUND));
    }

    info!(id, "Deleted sales plan");
    Ok(Json(DeleteResponse::ok()))
}

/// Confirms the set and channel exist and the channel detail belongs to the
/// channel. Returns the channel so its code can be stored with the plan.
async fn resolve_references(db_pool: &PgPool, plan: &ValidPlan) -> Result<SalesChannel, AppError> {
    let set_exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM set_products WHERE id = $1)",
    )
    .bind(plan.set_id)
    .fetch_one(db_pool)
    .await
    .map_err(server_error(PLAN_FAILED))?;

    if !set_exists {
        return Err(AppError::validation("유효하지 않은 세트품번입니다."));
    }

    let channel = sqlx::query_as::<_, SalesChannel>(
        "SELECT id, channel_code, channel_name, channel_details, created_at
         FROM sales_channels WHERE id = $1",
    )
    .bind(plan.channel_id)
    .fetch_optional(db_pool)
    .await
    .map_err(server_error(PLAN_FAILED))?
    .ok_or_else(|| AppError::validation("유효하지 않은 판매채널입니다."))?;

    if !channel.allows_detail(plan.channel_detail.as_deref().unwrap_or_default()) {
        return Err(AppError::validation("유효하지 않은 채널상세입니다."));
    }

    Ok(channel)
}

async fn fetch_plan(db_pool: &PgPool, id: i64) -> Result<SalesPlanResponse, AppError> {
    let row = sqlx::query_as::<_, SalesPlanRow>(&format!("{PLAN_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
        .map_err(server_error(PLAN_FAILED))?
        .ok_or_else(|| AppError::not_found(PLAN_NOT_FOUND))?;

    Ok(SalesPlanResponse::from(row))
}
