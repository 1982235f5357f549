//! User system for todokv
//!
//! Provides account creation with a username uniqueness check, password-based
//! authentication, and the [`Principal`] value that todo operations are
//! scoped by.

pub mod crypto;
pub mod errors;
pub mod repository;
pub mod types;

pub use errors::{MIN_PASSWORD_LENGTH, UserError};
pub use repository::UserRepository;
pub use types::*;
