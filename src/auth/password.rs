use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// A wrong password and a corrupt stored hash are distinct failures: the
/// first maps to an authentication error, the second to an internal one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed")]
    HashingFailed,

    #[error("password does not match")]
    Mismatch,

    #[error("stored password hash is malformed")]
    InvalidHash,
}

/// Hash a plaintext password with a fresh OS-random salt.
///
/// Output is a PHC string with the salt embedded, so hashing the same input
/// twice yields different strings.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::HashingFailed)
}

/// Verify a plaintext password against a stored PHC hash.
pub fn verify_password(plaintext: &str, stored: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHash)?;
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .map_err(|e| match e {
            argon2::password_hash::Error::Password => PasswordError::Mismatch,
            _ => PasswordError::InvalidHash,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret", &hash).is_ok());
    }

    #[test]
    fn wrong_password_is_a_mismatch() {
        let hash = hash_password("secret").unwrap();
        assert_eq!(
            verify_password("not-the-secret", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret", &first).is_ok());
        assert!(verify_password("secret", &second).is_ok());
    }

    #[test]
    fn malformed_stored_hash_is_not_a_mismatch() {
        assert_eq!(
            verify_password("secret", "not-a-phc-string"),
            Err(PasswordError::InvalidHash)
        );
    }
}
