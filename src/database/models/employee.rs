use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dni: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Calendar date, serialized as YYYY-MM-DD.
    pub birth_date: NaiveDate,
    pub employee_type_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
