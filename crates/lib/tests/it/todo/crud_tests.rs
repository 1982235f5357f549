//! Create, read, list and delete

use todokv::{Clock, CreateTodoInput, Namespace, StoreError, TodoError, TodoList, TodoRepository};

use crate::helpers::*;

#[test]
fn test_create_then_find_by_id() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");

    let created = todos
        .create(CreateTodoInput::new(&alice, "buy milk").with_description("semi-skimmed"))
        .unwrap();
    assert_eq!(created.title, "buy milk");
    assert_eq!(created.description, "semi-skimmed");
    assert!(!created.completed);
    assert_eq!(created.created_at, created.last_updated);

    let found = todos.find_by_id(alice.user_id(), created.id).unwrap();
    assert_eq!(found, created);
}

#[test]
fn test_create_honours_completed_flag() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");

    let done = todos
        .create(CreateTodoInput::new(&alice, "already done").with_completed(true))
        .unwrap();
    assert!(todos.find_by_id(alice.user_id(), done.id).unwrap().completed);
}

#[test]
fn test_timestamps_come_from_store_clock() {
    let (store, clock) = setup_store_with_clock();
    let (users, todos) = repositories(store);
    let alice = signup(&users, "alice");

    let _hold = clock.hold();
    let todo = add_todo(&todos, &alice, "stamped");
    assert_eq!(todo.created_at, clock.now_secs());
}

#[test]
fn test_ids_are_drawn_from_one_shared_sequence() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let bob = signup(&users, "bob");

    let a1 = add_todo(&todos, &alice, "a1");
    let b1 = add_todo(&todos, &bob, "b1");
    let a2 = add_todo(&todos, &alice, "a2");
    assert_eq!((a1.id, b1.id, a2.id), (1, 2, 3));
}

#[test]
fn test_find_missing_todo_is_not_found() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");

    let err = todos.find_by_id(alice.user_id(), 42).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        todokv::Error::Todo(TodoError::TodoNotFound { id: 42, .. })
    ));
}

#[test]
fn test_find_by_owner_returns_every_todo_in_key_order() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    for i in 1..=11 {
        add_todo(&todos, &alice, &format!("todo {i}"));
    }

    let listed = todos.find_by_owner(alice.user_id()).unwrap();
    assert_eq!(listed.len(), 11);
    // Keys hold decimal ids, so "10" and "11" sort between "1" and "2".
    assert_eq!(ids(&listed), vec![1, 10, 11, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(sorted_ids(&listed), (1..=11).collect::<Vec<_>>());
}

#[test]
fn test_find_by_owner_with_no_todos_is_empty() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    assert!(todos.find_by_owner(alice.user_id()).unwrap().is_empty());
}

#[test]
fn test_delete_removes_todo() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let keep = add_todo(&todos, &alice, "keep");
    let gone = add_todo(&todos, &alice, "gone");

    todos.delete(alice.user_id(), gone.id).unwrap();

    assert!(todos.find_by_id(alice.user_id(), gone.id).unwrap_err().is_not_found());
    assert_eq!(ids(&todos.find_by_owner(alice.user_id()).unwrap()), vec![keep.id]);
}

#[test]
fn test_delete_is_idempotent() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let todo = add_todo(&todos, &alice, "once");

    todos.delete(alice.user_id(), todo.id).unwrap();
    todos.delete(alice.user_id(), todo.id).unwrap();
    todos.delete(alice.user_id(), 9999).unwrap();
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let first = add_todo(&todos, &alice, "first");
    todos.delete(alice.user_id(), first.id).unwrap();

    let second = add_todo(&todos, &alice, "second");
    assert!(second.id > first.id);
}

#[test]
fn test_repository_accepts_empty_title() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");

    let input = CreateTodoInput::new(&alice, "");
    assert!(input.validate().unwrap_err().is_validation_error());
    let todo = todos.create(input).unwrap();
    assert_eq!(todos.find_by_id(alice.user_id(), todo.id).unwrap().title, "");
}

#[test]
fn test_list_partition_by_completion() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let open = add_todo(&todos, &alice, "open");
    let done = add_todo(&todos, &alice, "done");
    todos.toggle_completed(alice.user_id(), done.id).unwrap();

    let list = TodoList::partition(todos.find_by_owner(alice.user_id()).unwrap());
    assert_eq!(ids(&list.incomplete), vec![open.id]);
    assert_eq!(ids(&list.complete), vec![done.id]);
}

#[test]
fn test_undecodable_todo_surfaces_encoding_error() {
    let store = setup_store();
    let todos = TodoRepository::new(store.clone());
    store
        .write(|txn| txn.bucket(Namespace::Todos)?.put_json(b"1:1", &"not a todo"))
        .unwrap();

    assert!(todos.find_by_id(1, 1).unwrap_err().is_encoding_error());
    assert!(todos.find_by_owner(1).unwrap_err().is_encoding_error());
    assert!(todos.toggle_completed(1, 1).unwrap_err().is_encoding_error());
}

#[test]
fn test_malformed_key_under_owner_fails_listing() {
    let store = setup_store();
    let (users, todos) = repositories(store.clone());
    let alice = signup(&users, "alice");
    let valid = add_todo(&todos, &alice, "valid");

    let stray_key = format!("{}:abc", alice.user_id());
    store
        .write(|txn| {
            txn.bucket(Namespace::Todos)?
                .put_json(stray_key.as_bytes(), &valid)
        })
        .unwrap();

    let err = todos.find_by_owner(alice.user_id()).unwrap_err();
    assert!(err.is_encoding_error());
    assert!(matches!(
        err,
        todokv::Error::Store(StoreError::MalformedKey { namespace: "todos", ref key }) if *key == stray_key
    ));
}
