//! Core data types for todos

use serde::{Deserialize, Serialize};

use super::errors::TodoError;
use crate::{Result, user::Principal};

/// A todo item as stored and as returned to callers.
///
/// The owner is not part of the value; it is encoded in the storage key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Drawn from the `todos` sequence, shared by all owners
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Unix seconds, set once at creation
    pub created_at: i64,
    /// Unix seconds, refreshed by every mutation
    pub last_updated: i64,
}

/// Input for [`TodoRepository::create`](super::TodoRepository::create)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Set by the caller from an authenticated principal, never from the
    /// request payload.
    #[serde(skip)]
    pub owner_id: u64,
}

impl CreateTodoInput {
    /// An incomplete todo with an empty description, owned by `owner`.
    pub fn new(owner: &Principal, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            completed: false,
            owner_id: owner.user_id(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Rules applied by callers before creating a todo.
    ///
    /// The repository itself accepts an empty title.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(TodoError::TitleRequired.into());
        }
        Ok(())
    }
}

/// One owner's todos split by completion state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub complete: Vec<Todo>,
    pub incomplete: Vec<Todo>,
}

impl TodoList {
    /// Split `todos`, keeping their relative order within each half.
    pub fn partition(todos: impl IntoIterator<Item = Todo>) -> Self {
        let (complete, incomplete) = todos.into_iter().partition(|todo| todo.completed);
        Self {
            complete,
            incomplete,
        }
    }

    pub fn len(&self) -> usize {
        self.complete.len() + self.incomplete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
