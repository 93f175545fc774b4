//! User infrastructure module
//!
//! This module provides the in-memory user directory and the signup service
//! that records users after a successful submission.

mod repository;
mod service;

pub use repository::InMemoryUserDirectory;
pub use service::{SignupError, SignupService};
