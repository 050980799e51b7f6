pub mod auth;
pub mod health;
pub mod items;
pub mod profile;
pub mod shared;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Routes under `/api/v1` that anyone may call.
///
/// ```text
/// /auth/signup                 signup
/// /auth/login                  login
/// /shared/{slug}               public item
/// ```
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::public_router())
        .nest("/shared", shared::router())
}

/// Routes under `/api/v1` that act on the caller's own data. The router
/// wraps this whole tree in the authentication layer.
///
/// ```text
/// /auth/me                     current user
///
/// /profile                     get, upsert display settings
/// /profile/theme               get, upsert theme
///
/// /items                       list, create
/// /items/{id}                  get, update, delete
/// /items/{id}/star             toggle star (PATCH or PUT)
/// /items/{id}/share            enable / disable sharing
///
/// /tags                        list, create
/// /tags/{id}                   update, delete
/// ```
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::protected_router())
        .nest("/profile", profile::router())
        .nest("/items", items::router())
        .nest("/tags", tags::router())
}
