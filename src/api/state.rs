//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::user::SignupService;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub signup_service: Arc<SignupService>,
}

impl AppState {
    pub fn new(signup_service: Arc<SignupService>) -> Self {
        Self { signup_service }
    }
}
