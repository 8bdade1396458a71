//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, validates it, and injects the caller's identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use aviola_core::error::AppError;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's user id (token `sub`).
    pub user_id: Uuid,
    /// Validated token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt.verify(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            claims,
        })
    }
}

/// Authenticated caller with the `admin` role.
///
/// Used by event management endpoints; rejects non-admin tokens.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.claims.is_admin() {
            return Err(AppError::unauthorized("Administrator access required").into());
        }
        Ok(AdminUser(user))
    }
}
