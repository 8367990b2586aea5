//! Password hashing and session token digests.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Computes a SHA256 digest of the given bytes as lowercase hex.
fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Errors when hashing a password or reading a stored hash.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is not a valid PHC string: {0}")]
    Malformed(String),
}

/// Argon2id password hash, stored as a PHC string
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes a password with a fresh random salt.
    pub fn create(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::Hash(e.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Parses the PHC string produced by [`PasswordHash::as_stored`].
    pub fn parse(stored: &str) -> Result<Self, PasswordHashError> {
        argon2::PasswordHash::new(stored)
            .map_err(|e| PasswordHashError::Malformed(e.to_string()))?;
        Ok(Self(stored.to_string()))
    }

    /// Checks a candidate password against this hash.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = argon2::PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Returns the string written to the database.
    pub fn as_stored(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Opaque bearer token handed to the browser in the session cookie.
///
/// Only its digest is persisted, so a leaked database does not yield
/// usable cookies.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a new random token from the OS random source.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a token received from a client.
    pub fn from_client(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hex digest under which the token is stored.
    pub fn digest(&self) -> String {
        sha256_hex(self.0.as_bytes())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}
