// src/handlers/operational_quantity.rs
use axum::{extract::State, http::StatusCode, Json};
use sqlx::types::Json as SqlJson;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::dtos::common::{DataResponse, DeleteResponse};
use crate::dtos::operational_quantity::{CreateOperationalQuantityRequest, OperationalQuantityResponse};
use crate::error::{server_error, AppError};
use crate::extract::{AppJson, AppPath};
use crate::models::operational_quantity::{allocate, OperationalQuantityRow};
use crate::state::AppState;

const LIST_FAILED: &str = "운영수량 조회 중 오류가 발생했습니다.";
const CREATE_FAILED: &str = "운영수량 등록 중 오류가 발생했습니다.";
const DELETE_FAILED: &str = "삭제 중 오류가 발생했습니다.";
const NOT_FOUND: &str = "운영수량 데이터를 찾을 수 없습니다.";

const RECORD_SELECT: &str = "SELECT oq.id, oq.set_id, sp.set_name, oq.sizes, oq.total_quantity, oq.created_at
     FROM operational_quantities oq
     JOIN set_products sp ON sp.set_id = oq.set_id";

// GET /operational-quantity/list
#[instrument(skip(db_pool))]
pub async fn list_operational_quantities(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<DataResponse<Vec<OperationalQuantityResponse>>>, AppError> {
    let rows = sqlx::query_as::<_, OperationalQuantityRow>(&format!(
        "{RECORD_SELECT} ORDER BY oq.created_at DESC"
    ))
    .fetch_all(&db_pool)
    .await
    .map_err(server_error(LIST_FAILED))?;

    Ok(Json(DataResponse::new(
        rows.into_iter().map(OperationalQuantityResponse::from).collect(),
    )))
}

// POST /operational-quantity
#[instrument(skip(db_pool, payload))]
pub async fn create_operational_quantity(
    State(AppState { db_pool, .. }): State<AppState>,
    AppJson(payload): AppJson<CreateOperationalQuantityRequest>,
) -> Result<(StatusCode, Json<DataResponse<OperationalQuantityResponse>>), AppError> {
    let set_id = payload.set_id.trim().to_string();
    if set_id.is_empty() {
        return Err(AppError::validation("세트품번을 입력해주세요."));
    }
    if payload.sizes.is_empty() {
        return Err(AppError::validation("사이즈별 수량을 입력해주세요."));
    }
    if payload.sizes.iter().any(|s| s.size.trim().is_empty()) {
        return Err(AppError::validation("사이즈명을 입력해주세요."));
    }

    let (sizes, total_quantity) = allocate(
        payload
            .sizes
            .into_iter()
            .map(|s| (s.size.trim().to_string(), s.quantity)),
    )?;

    let set_name = sqlx::query_scalar::<_, String>("SELECT set_name FROM set_products WHERE set_id = $1")
        .bind(&set_id)
        .fetch_optional(&db_pool)
        .await
        .map_err(server_error(CREATE_FAILED))?
        .ok_or_else(|| AppError::validation("유효하지 않은 세트품번입니다."))?;

    let (id, created_at) = sqlx::query_as::<_, (Uuid, chrono::DateTime<chrono::Utc>)>(
        "INSERT INTO operational_quantities (id, set_id, sizes, total_quantity)
         VALUES ($1, $2, $3, $4)
         RETURNING id, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(&set_id)
    .bind(SqlJson(&sizes))
    .bind(total_quantity)
    .fetch_one(&db_pool)
    .await
    .map_err(server_error(CREATE_FAILED))?;

    info!(%id, %set_id, total_quantity, "Registered operational quantity");

    let record = OperationalQuantityRow {
        id,
        set_id,
        set_name,
        sizes: SqlJson(sizes),
        total_quantity,
        created_at,
    };
    Ok((StatusCode::CREATED, Json(DataResponse::new(record.into()))))
}

// DELETE /operational-quantity/{id}
//
// Always answers with `{success, error?}` so the list view can read the
// outcome from the body alone.
#[instrument(skip(db_pool))]
pub async fn delete_operational_quantity(
    State(AppState { db_pool, .. }): State<AppState>,
    AppPath(id): AppPath<String>,
) -> (StatusCode, Json<DeleteResponse>) {
    let Ok(id) = Uuid::parse_str(id.trim()) else {
        return (StatusCode::NOT_FOUND, Json(DeleteResponse::failed(NOT_FOUND)));
    };

    match sqlx::query("DELETE FROM operational_quantities WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
    {
        Ok(result) if result.rows_affected() == 0 => {
            (StatusCode::NOT_FOUND, Json(DeleteResponse::failed(NOT_FOUND)))
        }
        Ok(_) => {
            info!(%id, "Deleted operational quantity");
            (StatusCode::OK, Json(DeleteResponse::ok()))
        }
        Err(e) => {
            error!(?e, %id, "Failed to delete operational quantity");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse::failed(DELETE_FAILED)),
            )
        }
    }
}
