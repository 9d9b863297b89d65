use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Job classification, e.g. "Veterinarian" or "Assistant".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeType {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
