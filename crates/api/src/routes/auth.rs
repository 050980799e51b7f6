use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Account creation and login, reachable without a token.
///
/// ```text
/// POST /auth/signup  -> signup
/// POST /auth/login   -> login
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
}

/// The caller's own account.
///
/// ```text
/// GET /auth/me  -> me
/// ```
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/auth/me", get(auth::me))
}
