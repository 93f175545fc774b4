//! Registration form draft

use serde::{Deserialize, Serialize};

use super::agreement::{AgreementKind, Agreements};
use super::field::{Field, TextField};

/// Mutable draft of a registration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    pub referral_username: String,
    #[serde(flatten)]
    pub agreements: Agreements,
}

impl FormData {
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();

        match field {
            TextField::Email => self.email = value,
            TextField::Phone => self.phone = value,
            TextField::Password => self.password = value,
            TextField::ConfirmPassword => self.confirm_password = value,
            TextField::Username => self.username = value,
            TextField::ReferralUsername => self.referral_username = value,
        }
    }

    pub fn toggle_agreement(&mut self, kind: AgreementKind, value: bool) {
        self.agreements = self.agreements.toggle(kind, value);
    }

    /// Whether the field currently holds no input (unchecked for agreements)
    pub fn is_blank(&self, field: Field) -> bool {
        match field {
            Field::Email => self.email.is_empty(),
            Field::Password => self.password.is_empty(),
            Field::ConfirmPassword => self.confirm_password.is_empty(),
            Field::Phone => self.phone.is_empty(),
            Field::Username => self.username.is_empty(),
            Field::ReferralUsername => self.referral_username.is_empty(),
            Field::TermsAgree => !self.agreements.terms(),
            Field::PrivacyAgree => !self.agreements.privacy(),
        }
    }
}

impl std::fmt::Debug for FormData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormData")
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("username", &self.username)
            .field("referral_username", &self.referral_username)
            .field("agreements", &self.agreements)
            .finish()
    }
}
