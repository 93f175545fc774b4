//! In-memory user directory implementation

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;

/// In-memory, insertion-ordered implementation of UserDirectory
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Create a directory seeded from a JSON array of users
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::storage(format!("Failed to read seed file '{}': {}", path.display(), e))
        })?;

        let users: Vec<User> = serde_json::from_str(&content).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid seed file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let directory = Self::new();
        for user in users {
            directory.append(user)?;
        }

        Ok(directory)
    }

    /// Append a newly registered user.
    ///
    /// The id must be the next sequential id and the username must be free.
    pub fn append(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);

        let expected = UserId::next_after(users.len());
        if user.id() != expected {
            return Err(DomainError::conflict(format!(
                "User ID '{}' is out of sequence, expected '{}'",
                user.id(),
                expected
            )));
        }

        if users.iter().any(|u| u.username() == user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        users.push(user.clone());

        Ok(user)
    }

    /// Get a user by their ID
    pub fn get(&self, id: UserId) -> Option<User> {
        self.read().iter().find(|u| u.id() == id).cloned()
    }

    /// List all users in insertion order
    pub fn list(&self) -> Vec<User> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn resolve(&self, username: &str) -> Option<UserId> {
        self.read().as_slice().resolve(username)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
