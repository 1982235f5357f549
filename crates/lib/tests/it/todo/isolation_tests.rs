//! Owner isolation: a todo is only reachable through its owner's id

use todokv::{CreateTodoInput, Namespace, Todo, TodoRepository, keys::todo_key};

use crate::helpers::*;

fn create_for(todos: &TodoRepository, owner_id: u64, title: &str) -> u64 {
    todos
        .create(CreateTodoInput {
            title: title.to_string(),
            description: String::new(),
            completed: false,
            owner_id,
        })
        .unwrap()
        .id
}

#[test]
fn test_listing_does_not_leak_across_prefix_neighbours() {
    let (_, todos) = setup_repositories();
    create_for(&todos, 5, "five a");
    create_for(&todos, 5, "five b");
    create_for(&todos, 15, "fifteen");
    create_for(&todos, 50, "fifty");
    create_for(&todos, 1, "one");

    assert_eq!(todos.find_by_owner(5).unwrap().len(), 2);
    assert_eq!(todos.find_by_owner(15).unwrap().len(), 1);
    assert_eq!(todos.find_by_owner(50).unwrap().len(), 1);
    assert_eq!(todos.find_by_owner(1).unwrap().len(), 1);
    assert!(todos.find_by_owner(55).unwrap().is_empty());
}

#[test]
fn test_same_id_under_two_owners() {
    let store = setup_store();
    let todos = TodoRepository::new(store.clone());
    let seeded = |id| Todo {
        id,
        title: format!("todo {id}"),
        description: String::new(),
        completed: false,
        created_at: 0,
        last_updated: 0,
    };
    store
        .write(|txn| {
            let mut bucket = txn.bucket(Namespace::Todos)?;
            bucket.put_json(&todo_key(5, 1), &seeded(1))?;
            bucket.put_json(&todo_key(5, 2), &seeded(2))?;
            bucket.put_json(&todo_key(15, 1), &seeded(1))
        })
        .unwrap();

    assert_eq!(ids(&todos.find_by_owner(5).unwrap()), vec![1, 2]);
    assert_eq!(ids(&todos.find_by_owner(15).unwrap()), vec![1]);
    assert!(todos.find_by_owner(1).unwrap().is_empty());

    todos.toggle_completed(15, 1).unwrap();
    assert!(!todos.find_by_id(5, 1).unwrap().completed);
}

#[test]
fn test_other_owner_cannot_read_toggle_or_delete() {
    let (users, todos) = setup_repositories();
    let alice = signup(&users, "alice");
    let bob = signup(&users, "bob");
    let todo = add_todo(&todos, &alice, "private");

    assert!(todos.find_by_id(bob.user_id(), todo.id).unwrap_err().is_not_found());
    assert!(
        todos
            .toggle_completed(bob.user_id(), todo.id)
            .unwrap_err()
            .is_not_found()
    );

    // Deleting under the wrong owner succeeds but touches nothing.
    todos.delete(bob.user_id(), todo.id).unwrap();
    assert_eq!(todos.find_by_id(alice.user_id(), todo.id).unwrap(), todo);
}

#[test]
fn test_owner_id_comes_from_principal() {
    let (users, todos) = setup_repositories();
    signup(&users, "filler");
    let alice = signup(&users, "alice");
    assert_eq!(alice.user_id(), 2);

    let todo = add_todo(&todos, &alice, "mine");
    assert_eq!(ids(&todos.find_by_owner(2).unwrap()), vec![todo.id]);
    assert!(todos.find_by_owner(1).unwrap().is_empty());
}
