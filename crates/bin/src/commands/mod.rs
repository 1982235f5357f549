//! Subcommand implementations.

pub mod info;
pub mod todo;
pub mod user;
