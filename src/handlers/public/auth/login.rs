use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::{ApiResponse, ApiResult};
use crate::auth::password::{self, PasswordError};
use crate::auth::Role;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
    pub token: String,
}

/// POST /auth/login - authenticate credentials and return a bearer token.
///
/// Unknown email and wrong password produce the same client message.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(credentials) = body?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password, role, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(&credentials.email)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| {
        tracing::warn!(email = %credentials.email, "login with unknown email");
        ApiError::unauthorized("Invalid email or password")
    })?;

    password::verify_password(&credentials.password, &user.password).map_err(|e| match e {
        PasswordError::Mismatch => {
            tracing::warn!(email = %credentials.email, "login with wrong password");
            ApiError::unauthorized("Invalid email or password")
        }
        other => other.into(),
    })?;

    let token = state.tokens.issue(&user.email, user.role)?;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            role: user.role,
            token,
        },
    ))
}
