//! API key authentication middleware

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, Method, Request},
    middleware::Next,
    response::Response,
};

use super::Permission;
use crate::app::hash_api_key;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// Extract the API key from the Authorization header.
///
/// `None` means no header at all; a header that is not a bearer token is an error.
fn extract_api_key(request: &Request<Body>) -> Result<Option<&str>, AppError> {
    match request.headers().get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(Some)
            .ok_or(AppError::Unauthorized),
    }
}

/// Authentication middleware
///
/// Resolves the caller from the API key and injects the User into request
/// extensions. Requests without credentials pass through as anonymous;
/// requests with unknown credentials are rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(api_key) = extract_api_key(&request)? {
        let key_hash = hash_api_key(api_key);

        let user = state
            .user_service
            .find_by_api_key(&key_hash)
            .await?
            .ok_or(AppError::Unauthorized)?;

        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

/// The user making the request, if any
#[derive(Debug, Clone)]
pub struct Caller(pub Option<User>);

impl Caller {
    /// Check a permission for this caller and request method
    pub fn allow(&self, permission: Permission, method: &Method) -> Result<(), AppError> {
        permission.check(method, self.0.as_ref())
    }

    /// The authenticated user, or 401
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.0.as_ref().ok_or(AppError::Unauthorized)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<User>().cloned()))
    }
}
