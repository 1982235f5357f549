//! Core data types for the user system

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
    crypto,
    errors::{MIN_PASSWORD_LENGTH, UserError},
};
use crate::Result;

/// User record as persisted in the `users` namespace
///
/// Stored under its username, which makes the username unique. The password
/// hash never leaves this type; convert to [`User`] before handing a user to
/// anything outside the storage layer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Drawn from the `users` sequence, never reused
    user_id: u64,

    /// Unique username (login identifier)
    username: String,

    /// Password hash (Argon2id, PHC format)
    password_hash: String,

    /// Account creation timestamp (Unix seconds)
    created_at: i64,
}

impl UserRecord {
    pub(crate) fn new(
        user_id: u64,
        username: String,
        password_hash: String,
        created_at: i64,
    ) -> Self {
        Self {
            user_id,
            username,
            password_hash,
            created_at,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Check `password` against the stored hash.
    ///
    /// See [`crypto::verify_password`] for the meaning of `Ok(false)` versus `Err`.
    pub fn verify_password(&self, password: impl AsRef<str>) -> Result<bool> {
        crypto::verify_password(&self.password_hash, password)
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            user_id: record.user_id,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

/// A user as seen by callers of the storage layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub username: String,
    /// Unix seconds
    pub created_at: i64,
}

/// Input for [`UserRepository::create`](super::UserRepository::create)
///
/// The plaintext password is wiped from memory when the input is dropped.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
}

impl CreateUserInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Sign-up rules applied by callers before creating a user.
    ///
    /// The repository itself accepts any input.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(UserError::UsernameRequired.into());
        }
        if self.password.is_empty() {
            return Err(UserError::PasswordRequired.into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for CreateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated caller
///
/// Only [`UserRepository::authenticate`](super::UserRepository::authenticate)
/// produces a `Principal`. Callers pass its [`user_id`](Principal::user_id) as
/// the owner id of every todo operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    user_id: u64,
    username: String,
}

impl Principal {
    pub(crate) fn new(user_id: u64, username: String) -> Self {
        Self { user_id, username }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
