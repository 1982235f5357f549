//! User persistence in the `users` namespace

use tracing::{debug, warn};

use super::{
    crypto,
    errors::UserError,
    types::{CreateUserInput, Principal, User, UserRecord},
};
use crate::{
    Result,
    keys::user_key,
    store::{Namespace, Store},
};

/// Creates and looks up users.
#[derive(Clone, Debug)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create a new user account.
    ///
    /// The password is hashed before the transaction opens. Inside one write
    /// transaction the next user id is drawn, the username is checked for an
    /// existing record and the new record is written. Because the check and
    /// the write share a transaction, concurrent creates of one username
    /// cannot both succeed; the loser gets
    /// [`UserError::UsernameAlreadyExists`] and its id draw is rolled back.
    ///
    /// # Returns
    /// The created user, without its password hash
    pub fn create(&self, input: &CreateUserInput) -> Result<User> {
        let password_hash = crypto::hash_password(&input.password)?;
        let created_at = self.store.clock().now_secs();
        let key = user_key(&input.username);

        let record = self.store.write(|txn| {
            let user_id = txn.next_sequence(Namespace::Users)?;
            let mut users = txn.bucket(Namespace::Users)?;
            if users.contains(&key)? {
                return Err(UserError::UsernameAlreadyExists {
                    username: input.username.clone(),
                }
                .into());
            }

            let record = UserRecord::new(
                user_id,
                input.username.clone(),
                password_hash,
                created_at,
            );
            users.put_json(&key, &record)?;
            Ok(record)
        })?;

        debug!(user_id = record.user_id(), username = %record.username(), "Created user");
        Ok(record.into())
    }

    /// Look up the stored record for `username`.
    pub fn find_by_username(&self, username: &str) -> Result<UserRecord> {
        let key = user_key(username);
        self.store
            .read(|txn| txn.bucket(Namespace::Users)?.get_json(&key))?
            .ok_or_else(|| {
                UserError::UserNotFound {
                    username: username.to_string(),
                }
                .into()
            })
    }

    /// Resolve a principal back to its public user.
    pub fn find_by_principal(&self, principal: &Principal) -> Result<User> {
        let record = self.find_by_username(principal.username())?;
        if record.user_id() != principal.user_id() {
            // Usernames are never reassigned, so this principal came from another store.
            return Err(UserError::UserNotFound {
                username: principal.username().to_string(),
            }
            .into());
        }
        Ok(record.into())
    }

    /// Check credentials and produce the caller's [`Principal`].
    ///
    /// Unknown username, wrong password and an undecodable stored hash all
    /// return the same [`UserError::InvalidCredentials`]. Engine and decode
    /// failures of the record itself are surfaced as-is.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Principal> {
        let record = match self.find_by_username(username) {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                debug!(username, "Sign-in for unknown user");
                return Err(UserError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        match record.verify_password(password) {
            Ok(true) => Ok(Principal::new(record.user_id(), record.username().to_string())),
            Ok(false) => {
                debug!(username, "Sign-in with wrong password");
                Err(UserError::InvalidCredentials.into())
            }
            Err(e) => {
                warn!(username, error = %e, "Failed to verify password");
                Err(UserError::InvalidCredentials.into())
            }
        }
    }
}
