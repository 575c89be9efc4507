use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use crate::domain::models::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// Optional requester identity for endpoints that serve anonymous
/// traffic. A missing or invalid token degrades to a guest instead of
/// rejecting the request.
pub struct MaybeAuthUser(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return Ok(MaybeAuthUser(None));
        };

        let claims = match state.auth_service.verify(token) {
            Ok(claims) => claims,
            // Invalid token (expired, bad signature) -> Treat as guest
            Err(_) => return Ok(MaybeAuthUser(None)),
        };

        Ok(MaybeAuthUser(Some(AuthContext {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })))
    }
}
