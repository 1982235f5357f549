//! Error types for the user system
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("User already exists: {username}")]
    UsernameAlreadyExists { username: String },

    /// Covers unknown usernames and wrong passwords alike.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {reason}")]
    PasswordHashFailed { reason: String },

    #[error("Stored password hash is malformed: {reason}")]
    MalformedPasswordHash { reason: String },

    #[error("Username is required")]
    UsernameRequired,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

impl UserError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::UserNotFound { .. })
    }

    /// Check if this error is a uniqueness violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::UsernameAlreadyExists { .. })
    }

    /// Check if this error denies a sign-in attempt.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }

    /// Check if this error rejects caller-supplied input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            UserError::UsernameRequired
                | UserError::PasswordRequired
                | UserError::PasswordTooShort { .. }
        )
    }
}

impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
