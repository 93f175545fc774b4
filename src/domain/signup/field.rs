//! Form field identifiers and their validation rules

use serde::{Deserialize, Serialize};

/// A field tracked by the validation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "confirmPassword")]
    ConfirmPassword,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "referralUsername")]
    ReferralUsername,
    #[serde(rename = "isTermsAgree")]
    TermsAgree,
    #[serde(rename = "isPrivacyAgree")]
    PrivacyAgree,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Phone,
        Field::Username,
        Field::ReferralUsername,
        Field::TermsAgree,
        Field::PrivacyAgree,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Phone => "phone",
            Self::Username => "username",
            Self::ReferralUsername => "referralUsername",
            Self::TermsAgree => "isTermsAgree",
            Self::PrivacyAgree => "isPrivacyAgree",
        }
    }

    pub fn rule(&self) -> &'static FieldRule {
        // FIELD_RULES is declared in the same order as Field::ALL
        &FIELD_RULES[*self as usize]
    }

    pub fn is_required(&self) -> bool {
        self.rule().required
    }

    /// Fields whose validity must be recomputed when this one changes
    pub fn dependents(self) -> impl Iterator<Item = Field> {
        FIELD_RULES
            .iter()
            .filter(move |rule| rule.depends_on.contains(&self))
            .map(|rule| rule.field)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-text fields that can be edited through the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Username,
    ReferralUsername,
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Email => Field::Email,
            TextField::Phone => Field::Phone,
            TextField::Password => Field::Password,
            TextField::ConfirmPassword => Field::ConfirmPassword,
            TextField::Username => Field::Username,
            TextField::ReferralUsername => Field::ReferralUsername,
        }
    }
}

/// Validation contract of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// An empty value fails with a "required" error
    pub required: bool,
    /// Other fields read by this field's validator
    pub depends_on: &'static [Field],
    /// Validator consults the user directory
    pub directory_lookup: bool,
}

pub static FIELD_RULES: [FieldRule; 8] = [
    FieldRule {
        field: Field::Email,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::Password,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::ConfirmPassword,
        required: true,
        depends_on: &[Field::Password],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::Phone,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::Username,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::ReferralUsername,
        required: false,
        depends_on: &[],
        directory_lookup: true,
    },
    FieldRule {
        field: Field::TermsAgree,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
    FieldRule {
        field: Field::PrivacyAgree,
        required: true,
        depends_on: &[],
        directory_lookup: false,
    },
];
