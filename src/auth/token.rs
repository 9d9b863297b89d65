use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::{AuthError, Role};

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity: the user's email.
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens signed with a single symmetric
/// secret. Pure in-memory computation, safe to clone into every request.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

// `EncodingKey`/`DecodingKey` are opaque and implement neither `Debug` nor
// `PartialEq`, so these can't be derived; they exist only so the error-path
// `Result<TokenService, _>` assertions in the tests compile.
impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl PartialEq for TokenService {
    fn eq(&self, other: &Self) -> bool {
        self.ttl == other.ttl && self.validation == other.validation
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Configuration);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; a token one second past `exp` is expired.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    /// Build and sign a claim set for the given identity and role.
    pub fn issue(&self, email: &str, role: Role) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Single-shot verification: structure, algorithm, signature, expiry,
    /// then claim extraction. Each step has its own failure variant.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                _ => AuthError::MalformedToken,
            })
    }
}
