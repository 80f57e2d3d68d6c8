//! User handlers
//!
//! Registration and the caller's own profile.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{Caller, Permission};
use crate::error::AppError;
use crate::AppState;

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// Response body for user registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    /// API key for authenticated calls (Authorization: Bearer <api_key>)
    pub api_key: String,
    pub message: String,
}

/// Response body for the caller's profile
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub role: String,
    pub balance: i64,
    /// IDs of the courses the user is subscribed to
    pub subscriptions: Vec<String>,
}

/// POST /users/register
///
/// Register a new student. Returns the API key (only shown once).
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let (user, api_key) = state.user_service.register(&request.username).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id.to_string(),
            username: user.username,
            role: user.role.to_string(),
            api_key,
            message: "Save this API key - it won't be shown again.".to_string(),
        }),
    ))
}

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    method: Method,
    caller: Caller,
) -> Result<Json<ProfileResponse>, AppError> {
    caller.allow(Permission::IsAuthenticated, &method)?;
    let user = caller.require_user()?;

    let profile = state.user_service.profile(user).await?;

    Ok(Json(ProfileResponse {
        id: profile.user.id.to_string(),
        username: profile.user.username,
        role: profile.user.role.to_string(),
        balance: profile.balance,
        subscriptions: profile
            .subscriptions
            .iter()
            .map(|id| id.to_string())
            .collect(),
    }))
}
