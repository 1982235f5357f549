//! Constants used throughout the todokv library.
//!
//! Central definitions for the namespace (table) names persisted in the store
//! file. Changing any of these makes existing store files unreadable.

/// Namespace holding user records, keyed by username.
pub const USERS: &str = "users";

/// Namespace holding todo records, keyed by `"{owner_id}:{todo_id}"`.
pub const TODOS: &str = "todos";

/// Internal table holding one monotonic counter per namespace.
pub const SEQUENCES: &str = "_sequences";

/// Separator between the owner id and the todo id in a todo key.
pub const TODO_KEY_SEPARATOR: char = ':';
