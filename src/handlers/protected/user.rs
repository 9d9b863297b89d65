use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::auth::{password, Role};
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

const COLUMNS: &str = "id, email, password, role, created_at, updated_at";

/// Accounts are created through sign-up; this payload covers updates only.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub role: Role,
    /// When present, replaces the stored password and is re-hashed.
    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: Option<String>,
}

/// GET /api/v1/users
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY id"))
        .fetch_all(&state.pool)
        .await?;

    Ok(ApiResponse::success("Users found", users))
}

/// GET /api/v1/user/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<User> {
    let Path(id) = id?;

    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User was not found"))?;

    Ok(ApiResponse::success("User found", user))
}

/// PUT /api/v1/user/:id
///
/// A supplied password is hashed before it is stored; an omitted one is
/// left untouched.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Path(id) = id?;
    let Json(request) = body?;
    request.validate()?;

    let hash = match &request.password {
        Some(plaintext) => Some(password::hash_password(plaintext)?),
        None => None,
    };

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET email = $1, role = $2, password = COALESCE($3, password), \
         updated_at = NOW() WHERE id = $4 RETURNING {COLUMNS}"
    ))
    .bind(&request.email)
    .bind(request.role)
    .bind(hash)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("User was not found"))?;

    tracing::info!(id = user.id, email = %user.email, "user updated");
    Ok(ApiResponse::success("User updated successfully", user))
}

/// DELETE /api/v1/user/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("User was not found"));
    }

    tracing::info!(id, "user deleted");
    Ok(ApiResponse::message_only("User deleted successfully"))
}
