//! Signup domain
//!
//! This module provides the registration form model: field rules and
//! validators, the agreement checkboxes, the derived validation state and
//! the session that gates submission.

mod agreement;
mod field;
mod form;
mod session;
mod state;
mod validation;

pub use agreement::{derive_all, fan_out_all, AgreementKind, Agreements};
pub use field::{Field, FieldRule, TextField, FIELD_RULES};
pub use form::FormData;
pub use session::{SessionError, SessionOptions, SessionPhase, SignupSession};
pub use state::{ValidatedSignup, ValidationReport, ValidationState};
pub use validation::{
    check_agreement, check_confirm_password, check_email, check_field, check_password,
    check_phone, check_referral_username, check_username, normalize_phone,
    validate_confirm_password, validate_email, validate_password, validate_phone,
    validate_referral_username, validate_username, FieldError, FieldErrorKind,
};
