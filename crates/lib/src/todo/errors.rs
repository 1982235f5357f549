//! Error types for todo operations
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TodoError {
    /// No todo with this id exists under this owner. Also returned when the id
    /// exists only under a different owner.
    #[error("Todo with id {id} not found")]
    TodoNotFound { owner_id: u64, id: u64 },

    #[error("Title is required")]
    TitleRequired,
}

impl TodoError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::TodoNotFound { .. })
    }

    /// Check if this error rejects caller-supplied input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, TodoError::TitleRequired)
    }
}

impl From<TodoError> for crate::Error {
    fn from(err: TodoError) -> Self {
        crate::Error::Todo(err)
    }
}
