use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::Customer;
use crate::error::ApiError;
use crate::handlers::validate::digits_only;
use crate::state::AppState;

const COLUMNS: &str = "id, first_name, last_name, dni, email, phone_number, created_at, updated_at";

/// Create and update share the same full-replacement payload.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 70, message = "must be between 1 and 70 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 70, message = "must be between 1 and 70 characters"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 15, message = "must be between 1 and 15 characters"))]
    pub dni: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(
        length(max = 15, message = "must be at most 15 characters"),
        custom(function = "digits_only")
    )]
    pub phone_number: String,
}

/// GET /api/v1/customers
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let customers = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {COLUMNS} FROM customers ORDER BY id"
    ))
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success("Customers found", customers))
}

/// GET /api/v1/customer/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Customer> {
    let Path(id) = id?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Customer was not found"))?;

    Ok(ApiResponse::success("Customer found", customer))
}

/// POST /api/v1/customer
///
/// Duplicate dni, email or phone number surfaces as a 409.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CustomerPayload>, JsonRejection>,
) -> ApiResult<Customer> {
    let Json(payload) = body?;
    payload.validate()?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "INSERT INTO customers (first_name, last_name, dni, email, phone_number) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.dni)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(id = customer.id, "customer created");
    Ok(ApiResponse::created("Customer created successfully", customer))
}

/// PUT /api/v1/customer/:id - full replacement.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CustomerPayload>, JsonRejection>,
) -> ApiResult<Customer> {
    let Path(id) = id?;
    let Json(payload) = body?;
    payload.validate()?;

    let customer = sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers SET first_name = $1, last_name = $2, dni = $3, email = $4, \
         phone_number = $5, updated_at = NOW() WHERE id = $6 RETURNING {COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.dni)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Customer was not found"))?;

    Ok(ApiResponse::success("Customer updated successfully", customer))
}

/// DELETE /api/v1/customer/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;

    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Customer was not found"));
    }

    tracing::info!(id, "customer deleted");
    Ok(ApiResponse::message_only("Customer deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CustomerPayload {
        CustomerPayload {
            first_name: "Maria".to_string(),
            last_name: "Quispe".to_string(),
            dni: "45879632".to_string(),
            email: "maria@mail.test".to_string(),
            phone_number: "987654321".to_string(),
        }
    }

    #[test]
    fn well_formed_payload_passes_validation() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn phone_number_with_separators_fails_validation() {
        let mut bad = payload();
        bad.phone_number = "987-654-321".to_string();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn malformed_email_fails_validation() {
        let mut bad = payload();
        bad.email = "not-an-email".to_string();
        assert!(bad.validate().is_err());
    }
}
