pub mod password;
pub mod roles;
pub mod token;

pub use roles::Role;
pub use token::{Claims, TokenService};

use thiserror::Error;

/// Why a request failed authentication or authorization.
///
/// Everything except `InsufficientRole` maps to 401 at the HTTP boundary;
/// `InsufficientRole` is a 403. `Configuration` is fatal at startup and is
/// never produced per-request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token found in request")]
    MissingToken,

    #[error("token is malformed")]
    MalformedToken,

    #[error("unexpected token signing algorithm")]
    UnsupportedAlgorithm,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    TokenExpired,

    #[error("token claims are missing or malformed")]
    InvalidClaims,

    #[error("administrator role required")]
    InsufficientRole,

    #[error("token secret is not configured")]
    Configuration,

    #[error("token signing failed: {0}")]
    Signing(String),
}
