// src/handlers/channel.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use crate::dtos::channel::CreateChannelRequest;
use crate::dtos::common::{DataResponse, DeleteResponse};
use crate::error::{is_unique_violation, server_error, AppError};
use crate::extract::{AppJson, AppPath};
use crate::models::channel::SalesChannel;
use crate::state::AppState;

const CHANNEL_FAILED: &str = "판매채널 처리 중 오류가 발생했습니다.";

// GET /channels
#[instrument(skip(db_pool))]
pub async fn list_channels(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<DataResponse<Vec<SalesChannel>>>, AppError> {
    let channels = sqlx::query_as::<_, SalesChannel>(
        "SELECT id, channel_code, channel_name, channel_details, created_at
         FROM sales_channels ORDER BY channel_name",
    )
    .fetch_all(&db_pool)
    .await
    .map_err(server_error(CHANNEL_FAILED))?;

    Ok(Json(DataResponse::new(channels)))
}

// POST /channels
#[instrument(skip(db_pool, payload))]
pub async fn create_channel(
    State(AppState { db_pool, .. }): State<AppState>,
    AppJson(payload): AppJson<CreateChannelRequest>,
) -> Result<(StatusCode, Json<DataResponse<SalesChannel>>), AppError> {
    let code = payload.channel_code.trim();
    let name = payload.channel_name.trim();
    if code.is_empty() {
        return Err(AppError::validation("채널코드를 입력해주세요."));
    }
    if name.is_empty() {
        return Err(AppError::validation("채널명을 입력해주세요."));
    }

    let mut details: Vec<String> = Vec::new();
    for detail in payload.channel_details {
        let detail = detail.trim();
        if !detail.is_empty() && !details.iter().any(|d| d == detail) {
            details.push(detail.to_string());
        }
    }

    let channel = sqlx::query_as::<_, SalesChannel>(
        "INSERT INTO sales_channels (channel_code, channel_name, channel_details)
         VALUES ($1, $2, $3)
         RETURNING id, channel_code, channel_name, channel_details, created_at",
    )
    .bind(code)
    .bind(name)
    .bind(&details)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return AppError::validation("이미 존재하는 채널코드입니다.");
        }
        server_error(CHANNEL_FAILED)(e)
    })?;

    info!(id = channel.id, code = %channel.channel_code, "Added sales channel");
    Ok((StatusCode::CREATED, Json(DataResponse::new(channel))))
}

// DELETE /channels/{id}
#[instrument(skip(db_pool))]
pub async fn delete_channel(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    let in_use = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM sales_plans WHERE channel_id = $1)",
    )
    .bind(id)
    .fetch_one(&db_pool)
    .await
    .map_err(server_error(CHANNEL_FAILED))?;

    if in_use {
        return Err(AppError::conflict("판매계획에 사용 중인 채널은 삭제할 수 없습니다."));
    }

    let result = sqlx::query("DELETE FROM sales_channels WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
        .map_err(server_error(CHANNEL_FAILED))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("판매채널을 찾을 수 없습니다."));
    }

    Ok(Json(DeleteResponse::ok()))
}
