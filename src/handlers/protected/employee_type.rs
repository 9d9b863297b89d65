use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::EmployeeType;
use crate::error::ApiError;
use crate::state::AppState;

const COLUMNS: &str = "id, name, created_at, updated_at";

#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeTypePayload {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
}

/// GET /api/v1/types
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<EmployeeType>> {
    let types = sqlx::query_as::<_, EmployeeType>(&format!(
        "SELECT {COLUMNS} FROM employee_types ORDER BY id"
    ))
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success("Employee types found", types))
}

/// GET /api/v1/type/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<EmployeeType> {
    let Path(id) = id?;

    let employee_type = sqlx::query_as::<_, EmployeeType>(&format!(
        "SELECT {COLUMNS} FROM employee_types WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Employee type was not found"))?;

    Ok(ApiResponse::success("Employee type found", employee_type))
}

/// POST /api/v1/type - names are unique, duplicates are a 409.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeeTypePayload>, JsonRejection>,
) -> ApiResult<EmployeeType> {
    let Json(payload) = body?;
    payload.validate()?;

    let employee_type = sqlx::query_as::<_, EmployeeType>(&format!(
        "INSERT INTO employee_types (name) VALUES ($1) RETURNING {COLUMNS}"
    ))
    .bind(&payload.name)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(id = employee_type.id, name = %employee_type.name, "employee type created");
    Ok(ApiResponse::created(
        "Employee type created successfully",
        employee_type,
    ))
}

/// PUT /api/v1/type/:id
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<EmployeeTypePayload>, JsonRejection>,
) -> ApiResult<EmployeeType> {
    let Path(id) = id?;
    let Json(payload) = body?;
    payload.validate()?;

    let employee_type = sqlx::query_as::<_, EmployeeType>(&format!(
        "UPDATE employee_types SET name = $1, updated_at = NOW() WHERE id = $2 \
         RETURNING {COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Employee type was not found"))?;

    Ok(ApiResponse::success(
        "Employee type updated successfully",
        employee_type,
    ))
}

/// DELETE /api/v1/type/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;

    let result = sqlx::query("DELETE FROM employee_types WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee type was not found"));
    }

    tracing::info!(id, "employee type deleted");
    Ok(ApiResponse::message_only("Employee type deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let payload = EmployeeTypePayload {
            name: String::new(),
        };
        assert!(payload.validate().is_err());

        let payload = EmployeeTypePayload {
            name: "Veterinarian".to_string(),
        };
        assert!(payload.validate().is_ok());
    }
}
