//!
//! todokv: users and their todo lists in a single embedded key-value file.
//!
//! ## Core Concepts
//!
//! * **Store (`store::Store`)**: A handle to the single store file. All access goes through
//!   [`Store::read`] and [`Store::write`], which scope work to one engine transaction.
//! * **Namespaces (`store::Namespace`)**: The independently keyed `users` and `todos` partitions.
//! * **Keys (`keys`)**: The byte encoding of user and todo keys. Every todo key carries its
//!   owner's id as a prefix, so one owner's todos form one contiguous key range.
//! * **Users (`user::UserRepository`)**: Account creation with Argon2 password hashing, lookup
//!   by username and authentication into a [`Principal`].
//! * **Todos (`todo::TodoRepository`)**: Owner-scoped create, lookup, list, toggle and delete.
//!
//! A typical caller opens one store, hands clones of it to both repositories and passes the
//! `user_id` of an authenticated [`Principal`] as the owner of every todo operation.

pub mod clock;
pub mod constants;
pub mod keys;
pub mod store;
pub mod todo;
pub mod user;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::{ClockHold, FixedClock};
pub use store::{Namespace, Store, StoreError, StoreLocation};
pub use todo::{CreateTodoInput, Todo, TodoError, TodoList, TodoRepository};
pub use user::{CreateUserInput, Principal, User, UserError, UserRecord, UserRepository};

/// Result type used throughout the todokv library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the todokv library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured storage errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured user errors from the user module
    #[error(transparent)]
    User(user::UserError),

    /// Structured todo errors from the todo module
    #[error(transparent)]
    Todo(todo::TodoError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::User(_) => "user",
            Error::Todo(_) => "todo",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Todo(todo_err) => todo_err.is_not_found(),
            Error::Store(_) => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error denies a sign-in attempt.
    pub fn is_invalid_credentials(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_invalid_credentials(),
            _ => false,
        }
    }

    /// Check if this error is a value encode or decode failure.
    pub fn is_encoding_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_encoding_error(),
            _ => false,
        }
    }

    /// Check if this error came from the embedded engine.
    pub fn is_engine_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_engine_error(),
            _ => false,
        }
    }

    /// Check if this error rejects caller-supplied input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_validation_error(),
            Error::Todo(todo_err) => todo_err.is_validation_error(),
            Error::Store(_) => false,
        }
    }
}
