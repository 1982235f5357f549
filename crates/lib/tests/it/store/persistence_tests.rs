//! Store file lifecycle: create, reopen and exclusive locking

use std::sync::Arc;

use tempfile::tempdir;
use todokv::{
    CreateTodoInput, CreateUserInput, FixedClock, Namespace, Store, StoreLocation,
    TodoRepository, UserRepository,
};

use crate::helpers::*;

#[test]
fn test_open_creates_file_and_namespaces() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.redb");
    assert!(!path.exists());

    let store = Store::open(&path).expect("Failed to open store");
    assert!(path.exists());
    assert_eq!(store.location(), &StoreLocation::File(path.clone()));

    for namespace in Namespace::ALL {
        let empty = store
            .read(|txn| txn.bucket(namespace)?.is_empty())
            .unwrap();
        assert!(empty, "namespace {namespace} should start empty");
    }
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.redb");
    let clock = Arc::new(FixedClock::default());

    let (principal, todo) = {
        let store = Store::open_with_clock(&path, clock.clone()).unwrap();
        let (users, todos) = repositories(store);
        let principal = signup(&users, "alice");
        let todo = todos
            .create(CreateTodoInput::new(&principal, "buy milk").with_description("2 litres"))
            .unwrap();
        (principal, todo)
    };

    let store = Store::open_with_clock(&path, clock).unwrap();
    let (users, todos) = repositories(store);

    let reauthenticated = users.authenticate("alice", TEST_PASSWORD).unwrap();
    assert_eq!(reauthenticated, principal);
    assert_eq!(todos.find_by_id(principal.user_id(), todo.id).unwrap(), todo);
}

#[test]
fn test_sequences_continue_after_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.redb");

    let first = {
        let (users, todos) = repositories(Store::open(&path).unwrap());
        let alice = signup(&users, "alice");
        add_todo(&todos, &alice, "one")
    };

    let store = Store::open(&path).unwrap();
    let users = UserRepository::new(store.clone());
    let todos = TodoRepository::new(store);

    let bob = users
        .create(&CreateUserInput::new("bob", TEST_PASSWORD))
        .unwrap();
    assert_eq!(bob.user_id, 2);

    let alice = users.authenticate("alice", TEST_PASSWORD).unwrap();
    let second = add_todo(&todos, &alice, "two");
    assert!(second.id > first.id, "todo ids are never reused");
}

#[test]
fn test_second_open_of_locked_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("todos.redb");

    let _held = Store::open(&path).unwrap();
    let err = Store::open(&path).unwrap_err();
    assert!(err.is_engine_error());
    assert_eq!(err.module(), "store");
}

#[test]
fn test_clones_share_one_store() {
    let store = setup_store();
    let (users, _) = repositories(store.clone());
    signup(&users, "alice");

    let count = store
        .read(|txn| txn.bucket(Namespace::Users)?.len())
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(store.location(), &StoreLocation::Memory);
}
