// src/handlers/category.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::dtos::category::CreateCategoryRequest;
use crate::dtos::common::{DataResponse, DeleteResponse};
use crate::error::{is_unique_violation, server_error, AppError};
use crate::extract::{AppJson, AppPath};
use crate::models::category::Category;
use crate::state::AppState;

// GET /categories
#[instrument(skip(db_pool))]
pub async fn list_categories(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<DataResponse<Vec<Category>>>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, category_name, created_at FROM product_categories ORDER BY id",
    )
    .fetch_all(&db_pool)
    .await
    .map_err(server_error("카테고리 조회 중 오류가 발생했습니다."))?;

    Ok(Json(DataResponse::new(categories)))
}

// POST /categories
#[instrument(skip(db_pool, payload))]
pub async fn create_category(
    State(AppState { db_pool, .. }): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<DataResponse<Category>>), AppError> {
    let name = payload.category_name.trim();
    if name.is_empty() {
        return Err(AppError::validation("카테고리명을 입력해주세요."));
    }

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO product_categories (category_name) VALUES ($1)
         RETURNING id, category_name, created_at",
    )
    .bind(name)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return AppError::validation("이미 존재하는 카테고리입니다.");
        }
        server_error("카테고리 추가 중 오류가 발생했습니다.")(e)
    })?;

    info!(id = category.id, name = %category.category_name, "Added category");
    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

// DELETE /categories/{id}
#[instrument(skip(db_pool))]
pub async fn delete_category(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let result = sqlx::query("DELETE FROM product_categories WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
        .map_err(server_error("카테고리 삭제 중 오류가 발생했습니다."))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("카테고리를 찾을 수 없습니다."));
    }

    Ok(Json(DeleteResponse::ok()))
}
