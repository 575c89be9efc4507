use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::auth::AuthContext;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

/// Like AuthUser, but the decoded role must be admin.
pub struct AdminUser(pub AuthContext);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;

        if !ctx.is_admin() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }

        Ok(AdminUser(ctx))
    }
}
