use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::Employee;
use crate::error::ApiError;
use crate::handlers::validate::digits_only;
use crate::state::AppState;

const COLUMNS: &str = "id, first_name, last_name, dni, email, phone_number, address, \
                       birth_date, employee_type_id, created_at, updated_at";

#[derive(Debug, Deserialize, Validate)]
pub struct EmployeePayload {
    #[validate(length(min = 2, max = 70, message = "must be between 2 and 70 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 90, message = "must be between 3 and 90 characters"))]
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
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub address: String,
    /// YYYY-MM-DD; anything else is rejected at decode time.
    pub birth_date: NaiveDate,
    #[validate(range(min = 1, message = "must reference an employee type"))]
    pub employee_type_id: i64,
}

/// GET /api/v1/employees
pub async fn get_all(State(state): State<AppState>) -> ApiResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees ORDER BY id"
    ))
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success("Employees found", employees))
}

/// GET /api/v1/employee/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Employee> {
    let Path(id) = id?;

    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Employee was not found"))?;

    Ok(ApiResponse::success("Employee found", employee))
}

/// POST /api/v1/employee
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<Employee> {
    let Json(payload) = body?;
    payload.validate()?;

    let employee = sqlx::query_as::<_, Employee>(&format!(
        "INSERT INTO employees \
         (first_name, last_name, dni, email, phone_number, address, birth_date, employee_type_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.dni)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(&payload.address)
    .bind(payload.birth_date)
    .bind(payload.employee_type_id)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(id = employee.id, "employee created");
    Ok(ApiResponse::created("Employee created successfully", employee))
}

/// PUT /api/v1/employee/:id - full replacement.
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<Employee> {
    let Path(id) = id?;
    let Json(payload) = body?;
    payload.validate()?;

    let employee = sqlx::query_as::<_, Employee>(&format!(
        "UPDATE employees SET first_name = $1, last_name = $2, dni = $3, email = $4, \
         phone_number = $5, address = $6, birth_date = $7, employee_type_id = $8, \
         updated_at = NOW() WHERE id = $9 RETURNING {COLUMNS}"
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.dni)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(&payload.address)
    .bind(payload.birth_date)
    .bind(payload.employee_type_id)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Employee was not found"))?;

    Ok(ApiResponse::success("Employee updated successfully", employee))
}

/// DELETE /api/v1/employee/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;

    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee was not found"));
    }

    tracing::info!(id, "employee deleted");
    Ok(ApiResponse::message_only("Employee deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EmployeePayload {
        EmployeePayload {
            first_name: "Jorge".to_string(),
            last_name: "Salas".to_string(),
            dni: "41236587".to_string(),
            email: "jorge@clinic.test".to_string(),
            phone_number: "912345678".to_string(),
            address: "Av. Arequipa 1200".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 17).unwrap(),
            employee_type_id: 1,
        }
    }

    #[test]
    fn well_formed_payload_passes_validation() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn short_first_name_fails_validation() {
        let mut bad = payload();
        bad.first_name = "J".to_string();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn birth_date_deserializes_from_calendar_dates_only() {
        let value = serde_json::json!({
            "first_name": "Jorge",
            "last_name": "Salas",
            "dni": "41236587",
            "email": "jorge@clinic.test",
            "phone_number": "912345678",
            "address": "Av. Arequipa 1200",
            "birth_date": "1990-04-17",
            "employee_type_id": 1,
        });
        let decoded: EmployeePayload = serde_json::from_value(value).unwrap();
        assert_eq!(
            decoded.birth_date,
            NaiveDate::from_ymd_opt(1990, 4, 17).unwrap()
        );

        let bad = serde_json::json!({
            "first_name": "Jorge",
            "last_name": "Salas",
            "dni": "41236587",
            "email": "jorge@clinic.test",
            "phone_number": "912345678",
            "address": "Av. Arequipa 1200",
            "birth_date": "17/04/1990",
            "employee_type_id": 1,
        });
        assert!(serde_json::from_value::<EmployeePayload>(bad).is_err());
    }
}
