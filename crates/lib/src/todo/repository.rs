//! Todo persistence in the `todos` namespace

use tracing::debug;

use super::{
    errors::TodoError,
    types::{CreateTodoInput, Todo},
};
use crate::{
    Error, Result,
    keys::{parse_todo_key, todo_key, todo_prefix},
    store::{Namespace, Store, StoreError},
};

/// Creates, reads, toggles and deletes todos, always scoped by owner id.
#[derive(Clone, Debug)]
pub struct TodoRepository {
    store: Store,
}

impl TodoRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a todo under `input.owner_id`.
    ///
    /// The id comes from the `todos` sequence, which all owners share, so one
    /// owner's ids are unique but not contiguous. `created_at` and
    /// `last_updated` start equal.
    pub fn create(&self, input: CreateTodoInput) -> Result<Todo> {
        let now = self.store.clock().now_secs();
        let owner_id = input.owner_id;

        let todo = self.store.write(|txn| {
            let id = txn.next_sequence(Namespace::Todos)?;
            let todo = Todo {
                id,
                title: input.title,
                description: input.description,
                completed: input.completed,
                created_at: now,
                last_updated: now,
            };
            // Sequence ids are fresh, so nothing can already sit at this key.
            txn.bucket(Namespace::Todos)?
                .put_json(&todo_key(owner_id, id), &todo)?;
            Ok(todo)
        })?;

        debug!(owner_id, todo_id = todo.id, "Created todo");
        Ok(todo)
    }

    /// Fetch one todo. A todo stored under another owner is reported as
    /// [`TodoError::TodoNotFound`].
    pub fn find_by_id(&self, owner_id: u64, id: u64) -> Result<Todo> {
        let key = todo_key(owner_id, id);
        self.store
            .read(|txn| txn.bucket(Namespace::Todos)?.get_json(&key))?
            .ok_or_else(|| TodoError::TodoNotFound { owner_id, id }.into())
    }

    /// Every todo of `owner_id`, in key order.
    ///
    /// Keys carry decimal ids, so the order is lexicographic: id 10 comes
    /// before id 2. Callers wanting numeric or creation order sort the result.
    ///
    /// A key under the owner's prefix that is not a well-formed todo key fails
    /// the whole call with an encoding error.
    pub fn find_by_owner(&self, owner_id: u64) -> Result<Vec<Todo>> {
        let prefix = todo_prefix(owner_id);
        let entries = self
            .store
            .read(|txn| txn.bucket(Namespace::Todos)?.scan_prefix::<Todo>(&prefix))?;

        entries
            .into_iter()
            .map(|(key, todo)| match parse_todo_key(&key) {
                Some((owner, _)) if owner == owner_id => Ok(todo),
                _ => Err(Error::from(StoreError::MalformedKey {
                    namespace: Namespace::Todos.name(),
                    key: String::from_utf8_lossy(&key).into_owned(),
                })),
            })
            .collect()
    }

    /// Delete a todo. Deleting an absent todo succeeds.
    pub fn delete(&self, owner_id: u64, id: u64) -> Result<()> {
        let key = todo_key(owner_id, id);
        let existed = self
            .store
            .write(|txn| txn.bucket(Namespace::Todos)?.delete(&key))?;
        debug!(owner_id, todo_id = id, existed, "Deleted todo");
        Ok(())
    }

    /// Flip `completed` and refresh `last_updated`, returning the new state.
    ///
    /// Read, flip and write happen in one write transaction, so concurrent
    /// toggles of one todo never lose an update. `last_updated` always moves
    /// forward, by at least one second, even when two toggles land within the
    /// same clock second.
    pub fn toggle_completed(&self, owner_id: u64, id: u64) -> Result<Todo> {
        let key = todo_key(owner_id, id);

        let todo = self.store.write(|txn| {
            let mut todos = txn.bucket(Namespace::Todos)?;
            let mut todo: Todo = todos
                .get_json(&key)?
                .ok_or(TodoError::TodoNotFound { owner_id, id })?;

            let now = self.store.clock().now_secs();
            todo.completed = !todo.completed;
            todo.last_updated = now.max(todo.last_updated.saturating_add(1));

            todos.put_json(&key, &todo)?;
            Ok(todo)
        })?;

        debug!(owner_id, todo_id = id, completed = todo.completed, "Toggled todo");
        Ok(todo)
    }
}
