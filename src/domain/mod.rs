//! Domain layer - Core business logic and entities

pub mod error;
pub mod signup;
pub mod user;

pub use error::DomainError;
pub use signup::{
    AgreementKind, Agreements, Field, FieldError, FieldErrorKind, FormData, SessionError,
    SessionOptions, SessionPhase, SignupSession, TextField, ValidationReport, ValidationState,
};
pub use user::{User, UserDirectory, UserId};
