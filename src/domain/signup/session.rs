//! Signup form session
//!
//! A session owns one form draft and drives it from editing to a single
//! successful submission. Events are applied one at a time and every
//! operation completes synchronously.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::agreement::AgreementKind;
use super::field::{Field, TextField};
use super::form::FormData;
use super::state::ValidationState;
use crate::domain::user::{User, UserDirectory, UserId};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No submission attempted yet
    #[default]
    Editing,
    /// At least one submission was rejected; messages are visible
    SubmitAttempted,
    /// A user record was produced; the session accepts no more events
    Completed,
}

/// Session behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Re-validate a field (and its dependents) on every edit, even before
    /// the first submit attempt
    #[serde(default)]
    pub eager_validation: bool,
}

/// Errors returned by session operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Submission rejected: one or more fields are invalid")]
    Rejected(ValidationState),

    #[error("Session already completed")]
    Completed,
}

impl SessionError {
    /// Authoritative validity map of a rejected submission
    pub fn validation_state(&self) -> Option<&ValidationState> {
        match self {
            Self::Rejected(state) => Some(state),
            Self::Completed => None,
        }
    }
}

/// One registration attempt against a read-only user directory
#[derive(Debug)]
pub struct SignupSession<'d, D: UserDirectory + ?Sized> {
    directory: &'d D,
    form: FormData,
    validity: ValidationState,
    phase: SessionPhase,
    options: SessionOptions,
}

impl<'d, D: UserDirectory + ?Sized> SignupSession<'d, D> {
    /// Start a session with an empty form
    pub fn new(directory: &'d D, options: SessionOptions) -> Self {
        Self::with_form(directory, FormData::default(), options)
    }

    /// Start a session from an already filled-in form
    pub fn with_form(directory: &'d D, form: FormData, options: SessionOptions) -> Self {
        Self {
            directory,
            form,
            validity: ValidationState::new(),
            phase: SessionPhase::Editing,
            options,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn validity(&self) -> &ValidationState {
        &self.validity
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Messages become visible after the first submission attempt
    pub fn show_messages(&self) -> bool {
        self.phase != SessionPhase::Editing
    }

    /// Edit a text field
    pub fn update_field(
        &mut self,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.form.set_text(field, value);

        if self.revalidates_on_edit() {
            let field = Field::from(field);
            self.revalidate(std::iter::once(field).chain(field.dependents()));
        }

        Ok(())
    }

    /// Write one agreement checkbox
    pub fn toggle_agreement(
        &mut self,
        kind: AgreementKind,
        value: bool,
    ) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.form.toggle_agreement(kind, value);

        if self.revalidates_on_edit() {
            self.revalidate([Field::TermsAgree, Field::PrivacyAgree]);
        }

        Ok(())
    }

    /// Submit using the current time as the creation timestamp
    pub fn attempt_submit(&mut self) -> Result<User, SessionError> {
        self.attempt_submit_at(Utc::now())
    }

    /// Recompute every field, then either build the user record or reject.
    ///
    /// The aggregate is read from the state produced by this very pass.
    pub fn attempt_submit_at(&mut self, now: DateTime<Utc>) -> Result<User, SessionError> {
        self.ensure_open()?;

        match ValidationState::validate(&self.form, self.directory) {
            Ok(signup) => {
                self.validity = signup.validity().clone();
                self.phase = SessionPhase::Completed;

                let id = UserId::next_after(self.directory.len());
                let user = User::register(id, signup, now);

                info!(
                    user_id = %user.id(),
                    username = %user.username(),
                    referral_user_id = ?user.referral_user_id().map(|id| id.value()),
                    "Signup accepted"
                );

                Ok(user)
            }
            Err(state) => {
                self.validity = state.clone();
                self.phase = SessionPhase::SubmitAttempted;

                warn!(
                    invalid = ?state.invalid_fields().collect::<Vec<_>>(),
                    "Signup rejected"
                );

                Err(SessionError::Rejected(state))
            }
        }
    }

    /// After a rejected submit, messages are visible and must track every edit
    fn revalidates_on_edit(&self) -> bool {
        self.options.eager_validation || self.phase == SessionPhase::SubmitAttempted
    }

    fn revalidate(&mut self, fields: impl IntoIterator<Item = Field>) {
        self.validity.refresh(fields, &self.form, self.directory);
        debug!(validity = ?self.validity, "Eager validation");
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Completed {
            return Err(SessionError::Completed);
        }
        Ok(())
    }
}
