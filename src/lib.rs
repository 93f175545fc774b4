//! Signup Gate
//!
//! Registration form validation and submission:
//! - Per-field and cross-field validation (password confirmation, referrals)
//! - "Agree to all" checkbox aggregation
//! - A submission gate that builds a user record only from a fully valid form
//! - An HTTP API and CLI over an in-memory user directory

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use crate::config::SignupConfig;
use domain::{DomainError, UserDirectory};
use infrastructure::user::{InMemoryUserDirectory, SignupService};

/// Build the shared application state from the signup configuration
pub fn create_app_state(config: &SignupConfig) -> Result<AppState, DomainError> {
    let directory = match &config.seed_users {
        Some(path) => InMemoryUserDirectory::from_seed_file(path)?,
        None => InMemoryUserDirectory::new(),
    };

    info!(
        users = directory.len(),
        eager_validation = config.eager_validation,
        "User directory ready"
    );

    let service = SignupService::new(Arc::new(directory), config.session_options());

    Ok(AppState::new(Arc::new(service)))
}
