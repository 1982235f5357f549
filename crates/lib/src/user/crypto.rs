//! Password hashing for the user system
//!
//! Argon2id with the crate's default cost parameters, encoded as a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) so the parameters and salt
//! travel with the hash.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use super::errors::UserError;
use crate::Result;

/// Hash a password using Argon2id with a fresh random salt
///
/// # Arguments
/// * `password` - The password to hash
///
/// # Returns
/// The Argon2 hash string (PHC format). Fails only if the RNG or the hash
/// computation itself fails.
pub fn hash_password(password: impl AsRef<str>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| UserError::PasswordHashFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// # Arguments
/// * `password_hash` - The stored password hash (PHC format)
/// * `password` - The password to verify
///
/// # Returns
/// `Ok(true)` on a match and `Ok(false)` on a normal mismatch. An `Err` means
/// the stored hash could not be decoded at all. Both `Ok(false)` and `Err`
/// must deny access.
pub fn verify_password(password_hash: impl AsRef<str>, password: impl AsRef<str>) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|e| UserError::MalformedPasswordHash {
            reason: e.to_string(),
        })?;

    match Argon2::default().verify_password(password.as_ref().as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        // Unsupported algorithm, bad parameters, mangled output length...
        Err(e) => Err(UserError::MalformedPasswordHash {
            reason: e.to_string(),
        }
        .into()),
    }
}
