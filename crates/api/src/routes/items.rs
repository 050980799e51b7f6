use axum::routing::{get, put};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET, POST          /             -> list_items, create_item
/// GET, PUT, DELETE   /{id}         -> get_item, update_item, delete_item
/// PATCH, PUT         /{id}/star    -> toggle_star
/// PUT                /{id}/share   -> share_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route(
            "/{id}/star",
            put(items::toggle_star).patch(items::toggle_star),
        )
        .route("/{id}/share", put(items::share_item))
}
