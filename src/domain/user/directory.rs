//! Read-only user directory capability

use std::fmt::Debug;

use super::entity::{User, UserId};

#[cfg(test)]
use mockall::automock;

/// Read-only lookup over the existing users.
///
/// Lookups never mutate the directory and are safe to repeat. Username
/// matching is exact and case-sensitive.
#[cfg_attr(test, automock)]
pub trait UserDirectory: Send + Sync + Debug {
    /// Resolve a username to the id of the user that owns it
    fn resolve(&self, username: &str) -> Option<UserId>;

    /// Number of users in the directory
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a username exists
    fn contains(&self, username: &str) -> bool {
        self.resolve(username).is_some()
    }
}

impl UserDirectory for [User] {
    fn resolve(&self, username: &str) -> Option<UserId> {
        self.iter()
            .find(|user| user.username() == username)
            .map(User::id)
    }

    fn len(&self) -> usize {
        <[User]>::len(self)
    }
}

impl UserDirectory for Vec<User> {
    fn resolve(&self, username: &str) -> Option<UserId> {
        self.as_slice().resolve(username)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
