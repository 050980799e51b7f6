use axum::routing::get;
use axum::Router;

use crate::handlers::shared;
use crate::state::AppState;

/// Public routes mounted at `/shared`. No authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/{slug}", get(shared::get_shared_item))
}
