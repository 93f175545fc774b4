//! User domain
//!
//! This module provides the registered user record and the read-only
//! directory capability used to resolve existing users by username.

mod directory;
mod entity;

pub use directory::UserDirectory;
pub use entity::{User, UserId};

#[cfg(test)]
pub use directory::MockUserDirectory;
