//! Per-field validity derived from the form and the user directory

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::Field;
use super::form::FormData;
use super::validation::{check_field, check_referral_username, FieldErrorKind};
use crate::domain::user::{UserDirectory, UserId};

/// Validity of every validated field as of the last recomputation.
///
/// This is a cache of the form values and the directory. It is only ever
/// rebuilt from those inputs, never edited independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationState {
    entries: BTreeMap<Field, bool>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            entries: Field::ALL.into_iter().map(|field| (field, false)).collect(),
        }
    }
}

impl ValidationState {
    /// Initial state: nothing validated yet, every field invalid
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every entry from the current form values
    pub fn compute<D: UserDirectory + ?Sized>(form: &FormData, directory: &D) -> Self {
        evaluate(form, directory).0
    }

    /// Recompute every entry and, when all pass, hand out the validated form.
    ///
    /// The referral id is resolved in the same pass that decided validity.
    pub fn validate<D: UserDirectory + ?Sized>(
        form: &FormData,
        directory: &D,
    ) -> Result<ValidatedSignup, Self> {
        let (state, referral_user_id) = evaluate(form, directory);

        if !state.is_valid() {
            return Err(state);
        }

        Ok(ValidatedSignup {
            form: form.clone(),
            referral_user_id,
            validity: state,
        })
    }

    /// Recompute only the given entries
    pub fn refresh<D: UserDirectory + ?Sized>(
        &mut self,
        fields: impl IntoIterator<Item = Field>,
        form: &FormData,
        directory: &D,
    ) {
        for field in fields {
            let valid = check_field(field, form, directory).is_ok();
            self.entries.insert(field, valid);
        }
    }

    pub fn get(&self, field: Field) -> bool {
        self.entries.get(&field).copied().unwrap_or(false)
    }

    /// Aggregate: true only when every field is valid
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(|valid| *valid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, bool)> + '_ {
        self.entries.iter().map(|(field, valid)| (*field, *valid))
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.iter().filter(|(_, valid)| !valid).map(|(field, _)| field)
    }

    /// Error category to display for `field`, if any.
    ///
    /// Driven only by whether the value is blank, the cached validity and
    /// whether messages are currently shown.
    pub fn message_kind(
        &self,
        field: Field,
        form: &FormData,
        show_messages: bool,
    ) -> Option<FieldErrorKind> {
        if !show_messages || self.get(field) {
            return None;
        }

        if field.is_required() && form.is_blank(field) {
            return Some(FieldErrorKind::Required);
        }

        if field.rule().directory_lookup {
            return Some(FieldErrorKind::NotFound);
        }

        Some(FieldErrorKind::Format)
    }

    /// Summary of this state for display, with every message visible
    pub fn report(&self, form: &FormData) -> ValidationReport {
        let errors = Field::ALL
            .into_iter()
            .filter_map(|field| {
                self.message_kind(field, form, true)
                    .map(|kind| (field, kind))
            })
            .collect();

        ValidationReport {
            valid: self.is_valid(),
            fields: self.clone(),
            errors,
        }
    }
}

fn evaluate<D: UserDirectory + ?Sized>(
    form: &FormData,
    directory: &D,
) -> (ValidationState, Option<UserId>) {
    let mut state = ValidationState::new();
    let mut referral_user_id = None;

    for field in Field::ALL {
        let valid = match field {
            Field::ReferralUsername => {
                match check_referral_username(&form.referral_username, directory) {
                    Ok(resolved) => {
                        referral_user_id = resolved;
                        true
                    }
                    Err(_) => false,
                }
            }
            _ => check_field(field, form, directory).is_ok(),
        };
        state.entries.insert(field, valid);
    }

    debug!(
        valid = state.is_valid(),
        invalid = ?state.invalid_fields().collect::<Vec<_>>(),
        "Recomputed validation state"
    );

    (state, referral_user_id)
}

/// A form that passed every validator in one pass.
///
/// Only `ValidationState::validate` can build one, which is what allows
/// `User::register` to accept it as proof of a passing submission.
#[derive(Debug, Clone)]
pub struct ValidatedSignup {
    form: FormData,
    referral_user_id: Option<UserId>,
    validity: ValidationState,
}

impl ValidatedSignup {
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Resolved referral, `None` whenever the referral field was empty
    pub fn referral_user_id(&self) -> Option<UserId> {
        self.referral_user_id
    }

    /// The passing state this signup was validated with
    pub fn validity(&self) -> &ValidationState {
        &self.validity
    }

    pub fn into_form(self) -> FormData {
        self.form
    }
}

/// Validation outcome as exposed to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub fields: ValidationState,
    pub errors: BTreeMap<Field, FieldErrorKind>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signup::AgreementKind;
    use crate::domain::user::User;

    fn directory() -> Vec<User> {
        vec![User::existing(1, "alice"), User::existing(2, "bob")]
    }

    fn valid_form() -> FormData {
        let mut form = FormData {
            email: "a@b.com".to_string(),
            phone: "010-1234-5678".to_string(),
            password: "Abc12345!".to_string(),
            confirm_password: "Abc12345!".to_string(),
            username: "abc123".to_string(),
            referral_username: String::new(),
            ..Default::default()
        };
        form.toggle_agreement(AgreementKind::Terms, true);
        form.toggle_agreement(AgreementKind::Privacy, true);
        form
    }

    #[test]
    fn test_initial_state_is_all_invalid() {
        let state = ValidationState::new();

        assert_eq!(state.iter().count(), 8);
        assert!(!state.is_valid());
        assert!(Field::ALL.iter().all(|f| !state.get(*f)));
    }

    #[test]
    fn test_compute_valid_form() {
        let users = directory();
        let state = ValidationState::compute(&valid_form(), users.as_slice());

        assert!(state.is_valid());
        assert_eq!(state.invalid_fields().count(), 0);
    }

    #[test]
    fn test_marketing_does_not_gate() {
        let users = directory();
        let form = valid_form();
        assert!(!form.agreements.marketing());

        assert!(ValidationState::compute(&form, users.as_slice()).is_valid());
    }

    #[test]
    fn test_validate_resolves_referral_in_same_pass() {
        let users = directory();
        let mut form = valid_form();
        form.referral_username = "bob".to_string();

        let signup = ValidationState::validate(&form, users.as_slice()).unwrap();
        assert_eq!(signup.referral_user_id(), Some(UserId::new(2)));
    }

    #[test]
    fn test_validate_empty_referral_has_no_id() {
        let users = directory();
        let signup = ValidationState::validate(&valid_form(), users.as_slice()).unwrap();

        assert_eq!(signup.referral_user_id(), None);
    }

    #[test]
    fn test_unknown_referral_fails_aggregate() {
        let users = directory();
        let mut form = valid_form();
        form.referral_username = "ghost".to_string();

        let state = ValidationState::validate(&form, users.as_slice()).unwrap_err();

        assert!(!state.get(Field::ReferralUsername));
        assert!(!state.is_valid());
        assert_eq!(
            state.invalid_fields().collect::<Vec<_>>(),
            vec![Field::ReferralUsername]
        );
    }

    #[test]
    fn test_refresh_only_touches_given_fields() {
        let users = directory();
        let form = valid_form();
        let mut state = ValidationState::new();

        state.refresh([Field::Email, Field::Phone], &form, users.as_slice());

        assert!(state.get(Field::Email));
        assert!(state.get(Field::Phone));
        assert!(!state.get(Field::Password));
    }

    #[test]
    fn test_message_kinds() {
        let users = directory();
        let mut form = valid_form();
        form.email.clear();
        form.phone = "12".to_string();
        form.referral_username = "ghost".to_string();
        form.toggle_agreement(AgreementKind::Privacy, false);

        let state = ValidationState::compute(&form, users.as_slice());

        assert_eq!(state.message_kind(Field::Email, &form, false), None);
        assert_eq!(
            state.message_kind(Field::Email, &form, true),
            Some(FieldErrorKind::Required)
        );
        assert_eq!(
            state.message_kind(Field::Phone, &form, true),
            Some(FieldErrorKind::Format)
        );
        assert_eq!(
            state.message_kind(Field::ReferralUsername, &form, true),
            Some(FieldErrorKind::NotFound)
        );
        assert_eq!(
            state.message_kind(Field::PrivacyAgree, &form, true),
            Some(FieldErrorKind::Required)
        );
        assert_eq!(state.message_kind(Field::Username, &form, true), None);
    }

    #[test]
    fn test_report_serialization() {
        let users = directory();
        let mut form = valid_form();
        form.confirm_password = "Abc12345X".to_string();

        let report = ValidationState::compute(&form, users.as_slice()).report(&form);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["valid"], false);
        assert_eq!(json["fields"]["confirmPassword"], false);
        assert_eq!(json["fields"]["email"], true);
        assert_eq!(json["errors"]["confirmPassword"], "format");
        assert!(json["errors"].get("email").is_none());
    }
}
