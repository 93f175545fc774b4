//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::UserDirectory;

use super::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

/// Liveness plus the current directory size
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        users: Some(state.signup_service.directory().len()),
    };

    (StatusCode::OK, Json(response))
}

/// Process is up
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
