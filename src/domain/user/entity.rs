//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::signup::{normalize_phone, ValidatedSignup};

/// User identifier - sequential, assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Identifier assigned to the next user of a directory holding `len` users
    pub fn next_after(len: usize) -> Self {
        Self(len as u64 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: String,
    /// Digits only
    phone: String,
    username: String,
    /// Set only when a referral username was given and resolved
    referral_user_id: Option<UserId>,
    is_terms_agree: bool,
    is_privacy_agree: bool,
    is_marketing_agree: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build the record for a successful submission.
    ///
    /// A `ValidatedSignup` only exists when every field passed in a single
    /// validation pass, so a user can never be built from a rejected form.
    pub fn register(id: UserId, signup: ValidatedSignup, created_at: DateTime<Utc>) -> Self {
        let referral_user_id = signup.referral_user_id();
        let form = signup.into_form();
        let agreements = form.agreements;

        Self {
            id,
            phone: normalize_phone(&form.phone),
            email: form.email,
            username: form.username,
            referral_user_id,
            is_terms_agree: agreements.terms(),
            is_privacy_agree: agreements.privacy(),
            is_marketing_agree: agreements.marketing(),
            created_at,
        }
    }

    /// Record for a user that already exists in a directory (fixtures, imports)
    #[cfg(test)]
    pub(crate) fn existing(id: u64, username: &str) -> Self {
        Self {
            id: UserId::new(id),
            email: format!("{}@example.com", username),
            phone: "01000000000".to_string(),
            username: username.to_string(),
            referral_user_id: None,
            is_terms_agree: true,
            is_privacy_agree: true,
            is_marketing_agree: false,
            created_at: Utc::now(),
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn referral_user_id(&self) -> Option<UserId> {
        self.referral_user_id
    }

    pub fn is_terms_agree(&self) -> bool {
        self.is_terms_agree
    }

    pub fn is_privacy_agree(&self) -> bool {
        self.is_privacy_agree
    }

    pub fn is_marketing_agree(&self) -> bool {
        self.is_marketing_agree
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
