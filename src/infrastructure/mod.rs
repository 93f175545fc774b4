//! Infrastructure layer - Directory storage, services and logging

pub mod logging;
pub mod user;
