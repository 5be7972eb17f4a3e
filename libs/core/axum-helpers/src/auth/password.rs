use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors from password hashing and verification
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Verification failed. Deliberately opaque: callers cannot tell a
    /// malformed stored hash from a wrong password.
    #[error("invalid credentials")]
    Mismatch,
}

/// Capability interface for one-way password hashing.
///
/// The hash output must self-encode salt and cost parameters so `verify`
/// needs only the stored hash and the candidate plaintext.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, hash: &str, password: &str) -> Result<(), PasswordHashError>;
}

/// Argon2 implementation of [`PasswordHasher`].
///
/// Produces PHC-format strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
/// with a fresh OS-random salt per call.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError::Hash(e.to_string()))
    }

    fn verify(&self, hash: &str, password: &str) -> Result<(), PasswordHashError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordHashError::Mismatch)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordHashError::Mismatch)
    }
}
