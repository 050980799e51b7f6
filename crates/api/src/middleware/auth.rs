//! Caller identity for the authenticated part of the API.
//!
//! [`require_auth`] guards the protected route tree as a whole; handlers that
//! need to know who is calling take an [`AuthUser`] argument, which reuses the
//! account the middleware already resolved.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thoughtcache_core::error::CoreError;
use thoughtcache_core::types::DbId;
use thoughtcache_db::models::user::UserResponse;
use thoughtcache_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The account behind a valid Bearer token.
///
/// A token only counts while its account still exists; a signed token for a
/// deleted user is rejected like a forged one.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub account: UserResponse,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

impl AuthUser {
    async fn resolve(headers: &HeaderMap, state: &AppState) -> Result<Self, AppError> {
        let header = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.sub, "Token for unknown user");
                unauthorized("Unknown user")
            })?;

        Ok(AuthUser {
            user_id: user.id,
            account: UserResponse::from(&user),
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        Self::resolve(&parts.headers, state).await
    }
}

/// Route layer for the protected tree: rejects with 401 before the handler
/// runs and stores the resolved [`AuthUser`] in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthUser::resolve(request.headers(), &state).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
