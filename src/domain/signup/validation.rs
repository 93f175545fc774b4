//! Field validators
//!
//! Every `check_*` function is total over its input and reports why a value
//! was rejected. The `validate_*` functions are the boolean predicates used
//! for gating.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

use super::field::Field;
use super::form::FormData;
use crate::domain::user::{UserDirectory, UserId};

/// Error category used to pick a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Mandatory field left empty
    Required,
    /// Value present but malformed, or not matching its counterpart
    Format,
    /// Value refers to a user that does not exist
    NotFound,
}

/// Errors that can occur during field validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("Email address is not in a valid format")]
    InvalidEmail,

    #[error("Phone number contains invalid character: '{0}'")]
    InvalidPhoneCharacter(char),

    #[error("Phone number must contain 10 to 11 digits, got {0}")]
    PhoneDigitCount(usize),

    #[error("Phone number must start with '01'")]
    InvalidPhonePrefix,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Password must contain at least one letter")]
    PasswordMissingLetter,

    #[error("Password must contain at least one digit")]
    PasswordMissingDigit,

    #[error("Password must contain at least one special character")]
    PasswordMissingSpecial,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only letters and digits are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Referral user '{0}' does not exist")]
    ReferralNotFound(String),
}

impl FieldError {
    pub fn kind(&self) -> FieldErrorKind {
        match self {
            Self::Required(_) => FieldErrorKind::Required,
            Self::ReferralNotFound(_) => FieldErrorKind::NotFound,
            _ => FieldErrorKind::Format,
        }
    }
}

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 11;
const PHONE_PREFIX: &str = "01";
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 15;

static PHONE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9+\-(). ]+$").expect("phone character pattern is valid")
});

fn required(value: &str, field: Field) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required(field));
    }
    Ok(())
}

/// Strip every non-digit character from a phone number
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Must be a syntactically valid address
/// - Domain must contain a dot
pub fn check_email(email: &str) -> Result<(), FieldError> {
    required(email, Field::Email)?;

    let has_dotted_domain = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'));

    if !email.validate_email() || !has_dotted_domain {
        return Err(FieldError::InvalidEmail);
    }

    Ok(())
}

/// Validate a phone number as typed
///
/// Rules:
/// - Cannot be empty
/// - Only digits, spaces and `+ - ( ) .` are allowed
/// - 10 or 11 digits once formatting is stripped, starting with `01`
pub fn check_phone(phone: &str) -> Result<(), FieldError> {
    required(phone, Field::Phone)?;

    if !PHONE_CHARS.is_match(phone) {
        let bad = phone
            .chars()
            .find(|c| !(c.is_ascii_digit() || "+-(). ".contains(*c)))
            .unwrap_or(' ');
        return Err(FieldError::InvalidPhoneCharacter(bad));
    }

    let digits = normalize_phone(phone);

    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        return Err(FieldError::PhoneDigitCount(digits.len()));
    }

    if !digits.starts_with(PHONE_PREFIX) {
        return Err(FieldError::InvalidPhonePrefix);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Cannot be empty
/// - 8 to 128 characters
/// - At least one letter, one digit and one special character
pub fn check_password(password: &str) -> Result<(), FieldError> {
    required(password, Field::Password)?;

    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if length > MAX_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(FieldError::PasswordMissingLetter);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::PasswordMissingDigit);
    }

    if !password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control())
    {
        return Err(FieldError::PasswordMissingSpecial);
    }

    Ok(())
}

/// Validate the password confirmation against the current password
pub fn check_confirm_password(password: &str, confirm_password: &str) -> Result<(), FieldError> {
    required(confirm_password, Field::ConfirmPassword)?;

    if password.is_empty() || password != confirm_password {
        return Err(FieldError::PasswordMismatch);
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - 3 to 15 characters
/// - ASCII letters and digits only
pub fn check_username(username: &str) -> Result<(), FieldError> {
    required(username, Field::Username)?;

    if let Some(c) = username.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(FieldError::InvalidUsernameCharacter(c));
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(FieldError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(FieldError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

/// Validate an optional referral username, resolving it in the same step.
///
/// An empty value is valid and resolves to no referral.
pub fn check_referral_username<D: UserDirectory + ?Sized>(
    referral_username: &str,
    directory: &D,
) -> Result<Option<UserId>, FieldError> {
    if referral_username.is_empty() {
        return Ok(None);
    }

    directory
        .resolve(referral_username)
        .map(Some)
        .ok_or_else(|| FieldError::ReferralNotFound(referral_username.to_string()))
}

/// Validate a mandatory agreement checkbox
pub fn check_agreement(field: Field, agreed: bool) -> Result<(), FieldError> {
    if !agreed {
        return Err(FieldError::Required(field));
    }
    Ok(())
}

/// Run the validator of `field` against the current form values
pub fn check_field<D: UserDirectory + ?Sized>(
    field: Field,
    form: &FormData,
    directory: &D,
) -> Result<(), FieldError> {
    match field {
        Field::Email => check_email(&form.email),
        Field::Password => check_password(&form.password),
        Field::ConfirmPassword => check_confirm_password(&form.password, &form.confirm_password),
        Field::Phone => check_phone(&form.phone),
        Field::Username => check_username(&form.username),
        Field::ReferralUsername => {
            check_referral_username(&form.referral_username, directory).map(|_| ())
        }
        Field::TermsAgree => check_agreement(field, form.agreements.terms()),
        Field::PrivacyAgree => check_agreement(field, form.agreements.privacy()),
    }
}

pub fn validate_email(email: &str) -> bool {
    check_email(email).is_ok()
}

pub fn validate_phone(phone: &str) -> bool {
    check_phone(phone).is_ok()
}

pub fn validate_password(password: &str) -> bool {
    check_password(password).is_ok()
}

pub fn validate_confirm_password(password: &str, confirm_password: &str) -> bool {
    check_confirm_password(password, confirm_password).is_ok()
}

pub fn validate_username(username: &str) -> bool {
    check_username(username).is_ok()
}

pub fn validate_referral_username<D: UserDirectory + ?Sized>(
    referral_username: &str,
    directory: &D,
) -> bool {
    check_referral_username(referral_username, directory).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{MockUserDirectory, User};

    fn directory() -> Vec<User> {
        vec![User::existing(1, "alice"), User::existing(2, "bob")]
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last+tag@example.co.kr"));
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(check_email(""), Err(FieldError::Required(Field::Email)));
        assert_eq!(check_email("plainaddress"), Err(FieldError::InvalidEmail));
        assert_eq!(check_email("a@b"), Err(FieldError::InvalidEmail));
        assert_eq!(check_email("a@@b.com"), Err(FieldError::InvalidEmail));
    }

    // Phone tests
    #[test]
    fn test_valid_phones() {
        assert!(validate_phone("010-1234-5678"));
        assert!(validate_phone("01012345678"));
        assert!(validate_phone("(011) 123 4567"));
    }

    #[test]
    fn test_invalid_phones() {
        assert_eq!(check_phone(""), Err(FieldError::Required(Field::Phone)));
        assert_eq!(
            check_phone("010-1234-567a"),
            Err(FieldError::InvalidPhoneCharacter('a'))
        );
        assert_eq!(check_phone("010-123"), Err(FieldError::PhoneDigitCount(6)));
        assert_eq!(check_phone("9012345678"), Err(FieldError::InvalidPhonePrefix));
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("010-1234-5678"), "01012345678");
        assert_eq!(normalize_phone("+82 (10) 1234.5678"), "821012345678");
        assert_eq!(normalize_phone(""), "");
    }

    // Password tests
    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("Abc12345!"));
        assert!(validate_password("p@ssw0rd"));
    }

    #[test]
    fn test_invalid_passwords() {
        assert_eq!(check_password(""), Err(FieldError::Required(Field::Password)));
        assert_eq!(check_password("short"), Err(FieldError::PasswordTooShort(8)));
        assert_eq!(
            check_password(&format!("a1!{}", "x".repeat(126))),
            Err(FieldError::PasswordTooLong(128))
        );
        assert_eq!(check_password("12345678!"), Err(FieldError::PasswordMissingLetter));
        assert_eq!(check_password("abcdefgh!"), Err(FieldError::PasswordMissingDigit));
        assert_eq!(check_password("Abc123456"), Err(FieldError::PasswordMissingSpecial));
        assert_eq!(
            check_password("Abc12345\u{7}"),
            Err(FieldError::PasswordMissingSpecial)
        );
        assert_eq!(
            check_password("Abc12345\t"),
            Err(FieldError::PasswordMissingSpecial)
        );
    }

    #[test]
    fn test_password_error_kinds() {
        assert_eq!(check_password("").unwrap_err().kind(), FieldErrorKind::Required);
        assert_eq!(check_password("short").unwrap_err().kind(), FieldErrorKind::Format);
    }

    // Confirmation tests
    #[test]
    fn test_confirm_password_matches() {
        assert!(validate_confirm_password("Abc12345!", "Abc12345!"));
        assert!(!validate_confirm_password("Abc12345!", "Abc12345X"));
        assert!(!validate_confirm_password("", ""));
        assert!(!validate_confirm_password("", "Abc12345!"));
    }

    #[test]
    fn test_confirm_password_error_kinds() {
        assert_eq!(
            check_confirm_password("Abc12345!", ""),
            Err(FieldError::Required(Field::ConfirmPassword))
        );
        assert_eq!(
            check_confirm_password("Abc12345!", "abc12345!").unwrap_err().kind(),
            FieldErrorKind::Format
        );
    }

    // Username tests
    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("abc"));
        assert!(validate_username("abc123"));
        assert!(validate_username("ABCDEFGHIJ12345"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert_eq!(check_username(""), Err(FieldError::Required(Field::Username)));
        assert_eq!(check_username("ab"), Err(FieldError::UsernameTooShort(3)));
        assert_eq!(
            check_username(&"a".repeat(16)),
            Err(FieldError::UsernameTooLong(15))
        );
        assert_eq!(
            check_username("user_name"),
            Err(FieldError::InvalidUsernameCharacter('_'))
        );
    }

    // Referral tests
    #[test]
    fn test_empty_referral_is_valid_without_lookup() {
        // No expectations: any directory call would panic
        let directory = MockUserDirectory::new();

        assert_eq!(check_referral_username("", &directory), Ok(None));
        assert!(validate_referral_username("", &directory));
    }

    #[test]
    fn test_referral_resolves_through_directory() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_resolve()
            .withf(|username| username == "ghost")
            .times(1)
            .returning(|_| None);

        let result = check_referral_username("ghost", &directory);

        assert_eq!(result, Err(FieldError::ReferralNotFound("ghost".to_string())));
        assert_eq!(result.unwrap_err().kind(), FieldErrorKind::NotFound);
    }

    #[test]
    fn test_referral_against_fixture_directory() {
        let users = directory();

        assert_eq!(
            check_referral_username("bob", users.as_slice()),
            Ok(Some(UserId::new(2)))
        );
        assert!(!validate_referral_username("Bob", users.as_slice()));
        assert!(!validate_referral_username("ghost", users.as_slice()));
    }

    #[test]
    fn test_agreements_are_required() {
        assert!(check_agreement(Field::TermsAgree, true).is_ok());
        assert_eq!(
            check_agreement(Field::PrivacyAgree, false),
            Err(FieldError::Required(Field::PrivacyAgree))
        );
    }

    #[test]
    fn test_check_field_reads_live_values() {
        let users = directory();
        let mut form = FormData {
            password: "Abc12345!".to_string(),
            confirm_password: "Abc12345!".to_string(),
            ..Default::default()
        };

        assert!(check_field(Field::ConfirmPassword, &form, users.as_slice()).is_ok());

        form.password = "Xyz12345!".to_string();
        assert_eq!(
            check_field(Field::ConfirmPassword, &form, users.as_slice()),
            Err(FieldError::PasswordMismatch)
        );
    }
}
