use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use crate::domain::models::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Requester identity decoded from the `Authorization: Bearer` header.
/// Rejects the request when the header is missing or the token fails
/// verification.
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth_service.verify(token)?;

        let ctx = AuthContext {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        };

        Span::current().record("user_id", ctx.user_id.as_str());

        Ok(AuthUser(ctx))
    }
}
