//! Todo items, isolated per owning user
//!
//! Every todo lives under its owner's key prefix in the `todos` namespace, so
//! a todo is only reachable with the owner id it was created under.

pub mod errors;
pub mod repository;
pub mod types;

pub use errors::TodoError;
pub use repository::TodoRepository;
pub use types::*;
