//! Key codec for the flat key-value namespaces.
//!
//! Maps usernames and `(owner_id, todo_id)` pairs onto byte-string keys.
//! Ids are written as decimal text, so keys sort lexicographically rather than
//! numerically: under owner 5, `"5:10"` sorts before `"5:2"`.

use crate::constants::TODO_KEY_SEPARATOR;

/// Key for a user record: the UTF-8 bytes of the username.
pub fn user_key(username: &str) -> Vec<u8> {
    username.as_bytes().to_vec()
}

/// Key for a todo record: `"{owner_id}:{todo_id}"`.
pub fn todo_key(owner_id: u64, todo_id: u64) -> Vec<u8> {
    format!("{owner_id}{TODO_KEY_SEPARATOR}{todo_id}").into_bytes()
}

/// Prefix shared by every todo key of one owner: `"{owner_id}:"`.
///
/// The trailing separator keeps owner 1 from matching keys of owner 15.
pub fn todo_prefix(owner_id: u64) -> Vec<u8> {
    format!("{owner_id}{TODO_KEY_SEPARATOR}").into_bytes()
}

/// Split a todo key back into `(owner_id, todo_id)`.
///
/// Returns `None` for anything [`todo_key`] could not have produced.
pub fn parse_todo_key(key: &[u8]) -> Option<(u64, u64)> {
    let key = std::str::from_utf8(key).ok()?;
    let (owner, todo) = key.split_once(TODO_KEY_SEPARATOR)?;
    Some((parse_decimal(owner)?, parse_decimal(todo)?))
}

// Rejects signs and leading zeros so parsing stays the inverse of formatting.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0'))
    {
        return None;
    }
    s.parse().ok()
}
