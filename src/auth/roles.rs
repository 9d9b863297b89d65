use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege tiers carried on user records and inside token claims.
///
/// Only `Administrator` may manage employees, employee types and user
/// accounts; every other role is an authenticated caller with the base tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Employee,
    Veterinarian,
    Receptionist,
    Assistant,
    Standard,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRATOR",
            Role::Employee => "EMPLOYEE",
            Role::Veterinarian => "VETERINARIAN",
            Role::Receptionist => "RECEPTIONIST",
            Role::Assistant => "ASSISTANT",
            Role::Standard => "STANDARD",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMINISTRATOR" => Ok(Role::Administrator),
            "EMPLOYEE" => Ok(Role::Employee),
            "VETERINARIAN" => Ok(Role::Veterinarian),
            "RECEPTIONIST" => Ok(Role::Receptionist),
            "ASSISTANT" => Ok(Role::Assistant),
            "STANDARD" => Ok(Role::Standard),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

// Roles are stored as TEXT; map them onto the string codecs.

impl sqlx::Type<sqlx::Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Role>()?)
    }
}
