use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::auth::password;
use crate::auth::Role;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password cannot be empty"))]
    pub password: String,
    /// Defaults to STANDARD when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

/// POST /auth/sign-up - create a user account.
///
/// Field validation (including the empty-password check) runs before the
/// email uniqueness probe.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(request) = body?;
    request.validate()?;

    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(&request.email)
            .fetch_one(&state.pool)
            .await?;
    if exists {
        return Err(ApiError::conflict("Email already in use"));
    }

    let hash = password::hash_password(&request.password)?;
    let role = request.role.unwrap_or(Role::Standard);

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password, role) VALUES ($1, $2, $3) \
         RETURNING id, email, password, role, created_at, updated_at",
    )
    .bind(&request.email)
    .bind(&hash)
    .bind(role)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(email = %user.email, role = %user.role, "user registered");
    Ok(ApiResponse::created("User created successfully", user))
}
