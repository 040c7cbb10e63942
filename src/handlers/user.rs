use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, instrument, warn};

use crate::auth::jwt::{sign_token, TOKEN_TTL_HOURS};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterUserRequest, UserResponse};
use crate::error::{is_unique_violation, AppError};
use crate::extract::AppJson;
use crate::middleware::auth::AuthContext;
use crate::models::user::{is_valid_role, User};
use crate::state::AppState;

const USER_COLUMNS: &str = "id, username, password_hash, role, is_active, created_at";

// POST /users/register - admins create dashboard accounts
#[instrument(skip(db_pool, payload))]
pub async fn register_user(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(payload): AppJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    auth.require_admin("Only admins can register users")?;

    if !is_valid_role(&payload.role) {
        return Err(AppError::validation("Invalid role"));
    }
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password_hash, role)
         VALUES ($1, $2, $3)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(password_hash)
    .bind(&payload.role)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return AppError::conflict("Username already exists");
        }
        AppError::db(e)
    })?;

    info!(username = %user.username, role = %user.role, "Registered user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /users/login
#[instrument(skip(db_pool, jwt_secret, payload))]
pub async fn login_user(
    State(AppState { db_pool, jwt_secret }): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(&db_pool)
    .await?
    .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::forbidden("User inactive"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        warn!(username, "Rejected login");
        return Err(AppError::Unauthorized);
    }

    let token = sign_token(user.id, &user.role, &user.username, &jwt_secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_TTL_HOURS * 60 * 60,
    }))
}

// GET /users/me
pub async fn get_me(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(auth.user_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}
