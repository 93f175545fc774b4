//! Signup endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{FormData, User, UserId, ValidationReport};
use crate::infrastructure::user::SignupError;

pub fn create_signup_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(register))
        .route("/signup/validate", post(validate))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/referrals/{username}", get(resolve_referral))
}

/// POST /api/signup
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Result<(StatusCode, Json<User>), Response> {
    debug!(username = %form.username, "Signup submitted");

    match state.signup_service.register(form).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(SignupError::Rejected(report)) => {
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(report)).into_response())
        }
        Err(SignupError::Domain(err)) => Err(ApiError::from(err).into_response()),
    }
}

/// POST /api/signup/validate
pub async fn validate(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Json<ValidationReport> {
    Json(state.signup_service.validate(&form))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.signup_service.list_users())
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .signup_service
        .get_user(UserId::new(id))
        .map_err(|e| ApiError::from(e).with_param("id"))?;
    Ok(Json(user))
}

/// Resolved referral target
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub username: String,
    pub user_id: UserId,
}

/// GET /api/referrals/{username}
pub async fn resolve_referral(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ReferralResponse>, ApiError> {
    let user_id = state
        .signup_service
        .resolve_referral(&username)
        .ok_or_else(|| {
            ApiError::not_found(format!("Referral user '{}' does not exist", username))
                .with_param("username")
        })?;

    Ok(Json(ReferralResponse { username, user_id }))
}
