//! Signup service: runs submissions and records the resulting users

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::signup::{
    FormData, SessionError, SessionOptions, SignupSession, ValidationReport, ValidationState,
};
use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;

use super::repository::InMemoryUserDirectory;

/// Errors returned by the signup service
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Signup rejected")]
    Rejected(ValidationReport),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Signup service owning the user directory
#[derive(Debug)]
pub struct SignupService {
    directory: Arc<InMemoryUserDirectory>,
    options: SessionOptions,
    /// Serializes evaluate-then-append so the directory never changes mid-evaluation
    submit_lock: Mutex<()>,
}

impl SignupService {
    /// Create a new signup service
    pub fn new(directory: Arc<InMemoryUserDirectory>, options: SessionOptions) -> Self {
        Self {
            directory,
            options,
            submit_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Arc<InMemoryUserDirectory> {
        &self.directory
    }

    /// Submit a completed form and record the new user
    pub async fn register(&self, form: FormData) -> Result<User, SignupError> {
        let _guard = self.submit_lock.lock().await;

        let user = {
            let mut session =
                SignupSession::with_form(self.directory.as_ref(), form.clone(), self.options);

            match session.attempt_submit() {
                Ok(user) => user,
                Err(SessionError::Rejected(state)) => {
                    return Err(SignupError::Rejected(state.report(&form)));
                }
                Err(SessionError::Completed) => {
                    return Err(
                        DomainError::internal("Fresh signup session was already completed").into(),
                    );
                }
            }
        };

        // The session has returned; only now may the directory change
        let user = self.directory.append(user)?;

        info!(user_id = %user.id(), directory_size = self.directory.len(), "User registered");

        Ok(user)
    }

    /// Evaluate a form without registering it
    pub fn validate(&self, form: &FormData) -> ValidationReport {
        debug!(form = ?form, "Validating signup form");
        ValidationState::compute(form, self.directory.as_ref()).report(form)
    }

    /// Resolve a referral username to a user id
    pub fn resolve_referral(&self, username: &str) -> Option<UserId> {
        self.directory.resolve(username)
    }

    /// List registered users
    pub fn list_users(&self) -> Vec<User> {
        self.directory.list()
    }

    /// Get a registered user
    pub fn get_user(&self, id: UserId) -> Result<User, DomainError> {
        self.directory
            .get(id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }
}
