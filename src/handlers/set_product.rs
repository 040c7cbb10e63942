// src/handlers/set_product.rs
use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::dtos::common::{DataResponse, DeleteResponse};
use crate::dtos::set_product::{RegisterSetRequest, SetActiveRequest, SetListQuery};
use crate::error::{is_unique_violation, server_error, AppError};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::set_product::SetProduct;
use crate::state::AppState;

pub const DUPLICATE_SET_ID: &str = "이미 존재하는 세트번호입니다.";
const REGISTER_FAILED: &str = "세트상품 등록 중 오류가 발생했습니다.";
const LIST_FAILED: &str = "세트상품 조회 중 오류가 발생했습니다.";
const UPDATE_FAILED: &str = "세트상품 수정 중 오류가 발생했습니다.";
const DELETE_FAILED: &str = "세트상품 삭제 중 오류가 발생했습니다.";

const SET_COLUMNS: &str = "id, set_id, set_name, product_codes, remarks, is_active, created_at";

// POST /dashboard/sets/register
#[instrument(skip(db_pool, payload))]
pub async fn register_set(
    State(AppState { db_pool, .. }): State<AppState>,
    AppJson(payload): AppJson<RegisterSetRequest>,
) -> Result<Json<DataResponse<SetProduct>>, AppError> {
    let payload = payload.normalized();
    if payload.set_id.is_empty() {
        return Err(AppError::validation("세트번호를 입력해주세요."));
    }
    if payload.set_name.is_empty() {
        return Err(AppError::validation("세트명을 입력해주세요."));
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM set_products WHERE set_id = $1")
        .bind(&payload.set_id)
        .fetch_optional(&db_pool)
        .await
        .map_err(server_error(REGISTER_FAILED))?;

    if existing.is_some() {
        return Err(AppError::validation(DUPLICATE_SET_ID));
    }

    // A concurrent insert can still win the race; the unique index catches it.
    let set = sqlx::query_as::<_, SetProduct>(&format!(
        "INSERT INTO set_products (set_id, set_name, product_codes, remarks)
         VALUES ($1, $2, $3, $4)
         RETURNING {SET_COLUMNS}"
    ))
    .bind(&payload.set_id)
    .bind(&payload.set_name)
    .bind(&payload.product_codes)
    .bind(&payload.remarks)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return AppError::validation(DUPLICATE_SET_ID);
        }
        server_error(REGISTER_FAILED)(e)
    })?;

    info!(set_id = %set.set_id, "Registered set product");
    Ok(Json(DataResponse::new(set)))
}

// GET /dashboard/sets
#[instrument(skip(db_pool))]
pub async fn list_sets(
    State(AppState { db_pool, .. }): State<AppState>,
    AppQuery(query): AppQuery<SetListQuery>,
) -> Result<Json<DataResponse<Vec<SetProduct>>>, AppError> {
    let sets = sqlx::query_as::<_, SetProduct>(&format!(
        "SELECT {SET_COLUMNS} FROM set_products
         WHERE ($1::BOOLEAN IS NULL OR is_active = $1)
         ORDER BY set_id"
    ))
    .bind(query.active)
    .fetch_all(&db_pool)
    .await
    .map_err(server_error(LIST_FAILED))?;

    Ok(Json(DataResponse::new(sets)))
}

// PUT /dashboard/sets/{id}/active
#[instrument(skip(db_pool, payload))]
pub async fn set_active(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<SetActiveRequest>,
) -> Result<Json<DataResponse<SetProduct>>, AppError> {
    let set = sqlx::query_as::<_, SetProduct>(&format!(
        "UPDATE set_products SET is_active = $2 WHERE id = $1
         RETURNING {SET_COLUMNS}"
    ))
    .bind(id)
    .bind(payload.is_active)
    .fetch_optional(&db_pool)
    .await
    .map_err(server_error(UPDATE_FAILED))?
    .ok_or_else(|| AppError::not_found("세트상품을 찾을 수 없습니다."))?;

    info!(set_id = %set.set_id, is_active = set.is_active, "Changed set product status");
    Ok(Json(DataResponse::new(set)))
}

// DELETE /dashboard/sets/{id}
#[instrument(skip(db_pool))]
pub async fn delete_set(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let in_use = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM sales_plans WHERE set_id = $1)",
    )
    .bind(id)
    .fetch_one(&db_pool)
    .await
    .map_err(server_error(DELETE_FAILED))?;

    if in_use {
        return Err(AppError::conflict("판매계획에 사용 중인 세트는 삭제할 수 없습니다."));
    }

    let result = sqlx::query("DELETE FROM set_products WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
        .map_err(server_error(DELETE_FAILED))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("세트상품을 찾을 수 없습니다."));
    }

    info!(id, "Deleted set product");
    Ok(Json(DeleteResponse::ok()))
}
