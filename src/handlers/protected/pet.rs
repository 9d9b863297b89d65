use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::Pet;
use crate::error::ApiError;
use crate::state::AppState;

const COLUMNS: &str =
    "id, name, specie, gender, race, age, weight, customer_id, created_at, updated_at";

#[derive(Debug, Deserialize, Validate)]
pub struct PetPayload {
    #[validate(length(min = 1, max = 70, message = "must be between 1 and 70 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub specie: String,
    #[validate(length(min = 1, max = 10, message = "must be between 1 and 10 characters"))]
    pub gender: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub race: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub weight: f64,
    /// Owning customer; must reference an existing record.
    #[validate(range(min = 1, message = "must reference a customer"))]
    pub customer_id: i64,
}

/// GET /api/v1/pets
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<Pet>> {
    let pets = sqlx::query_as::<_, Pet>(&format!("SELECT {COLUMNS} FROM pets ORDER BY id"))
        .fetch_all(&state.pool)
        .await?;

    Ok(ApiResponse::success("Pets found", pets))
}

/// GET /api/v1/pet/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Pet> {
    let Path(id) = id?;

    let pet = sqlx::query_as::<_, Pet>(&format!("SELECT {COLUMNS} FROM pets WHERE id = $1"))
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Pet was not found"))?;

    Ok(ApiResponse::success("Pet found", pet))
}

/// POST /api/v1/pet
///
/// An unknown customer_id is rejected by the foreign key and reported as a
/// 400, not a 500.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<PetPayload>, JsonRejection>,
) -> ApiResult<Pet> {
    let Json(payload) = body?;
    payload.validate()?;

    let pet = sqlx::query_as::<_, Pet>(&format!(
        "INSERT INTO pets (name, specie, gender, race, age, weight, customer_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.specie)
    .bind(&payload.gender)
    .bind(&payload.race)
    .bind(payload.age)
    .bind(payload.weight)
    .bind(payload.customer_id)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(id = pet.id, customer_id = pet.customer_id, "pet created");
    Ok(ApiResponse::created("Pet created successfully", pet))
}

/// PUT /api/v1/pet/:id - full replacement.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PetPayload>, JsonRejection>,
) -> ApiResult<Pet> {
    let Path(id) = id?;
    let Json(payload) = body?;
    payload.validate()?;

    let pet = sqlx::query_as::<_, Pet>(&format!(
        "UPDATE pets SET name = $1, specie = $2, gender = $3, race = $4, age = $5, \
         weight = $6, customer_id = $7, updated_at = NOW() WHERE id = $8 RETURNING {COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.specie)
    .bind(&payload.gender)
    .bind(&payload.race)
    .bind(payload.age)
    .bind(payload.weight)
    .bind(payload.customer_id)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Pet was not found"))?;

    Ok(ApiResponse::success("Pet updated successfully", pet))
}

/// DELETE /api/v1/pet/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;

    let result = sqlx::query("DELETE FROM pets WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Pet was not found"));
    }

    tracing::info!(id, "pet deleted");
    Ok(ApiResponse::message_only("Pet deleted successfully"))
}
