use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET, PUT /        -> get_profile, update_profile
/// GET, PUT /theme   -> get_theme, update_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/theme", get(profile::get_theme).put(profile::update_theme))
}
