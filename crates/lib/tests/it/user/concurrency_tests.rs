//! Concurrent account creation

use std::{sync::Barrier, thread};

use todokv::CreateUserInput;

use crate::helpers::*;

#[test]
fn test_concurrent_creates_of_one_username_admit_exactly_one() {
    const CONTENDERS: usize = 6;
    let (users, _) = setup_repositories();
    let barrier = Barrier::new(CONTENDERS);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..CONTENDERS)
            .map(|i| {
                let users = users.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    users.create(&CreateUserInput::new("alice", format!("password-{i}")))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1, "exactly one create must succeed");
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(err.is_conflict(), "losers must see a conflict, got {err}");
    }

    // Ids drawn by losing creates are rolled back with their transactions.
    assert_eq!(winners[0].user_id, 1);
    assert_eq!(users.find_by_username("alice").unwrap().user_id(), 1);
}

#[test]
fn test_concurrent_creates_of_distinct_usernames_all_succeed() {
    let (users, _) = setup_repositories();

    let mut ids: Vec<u64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..5)
            .map(|i| {
                let users = users.clone();
                scope.spawn(move || {
                    users
                        .create(&CreateUserInput::new(format!("user{i}"), TEST_PASSWORD))
                        .unwrap()
                        .user_id
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
