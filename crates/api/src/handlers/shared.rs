//! Public, unauthenticated access to shared items.

use axum::extract::State;
use thoughtcache_core::sharing::is_valid_slug;
use thoughtcache_db::models::item::ItemWithTags;
use thoughtcache_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/shared/{slug}
///
/// Returns the item only while it is public. Unknown, malformed and
/// unshared slugs are indistinguishable.
pub async fn get_shared_item(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
) -> AppResult<DataResponse<ItemWithTags>> {
    let not_found = || AppError::NotFound(format!("No shared item for '{slug}'"));

    if !is_valid_slug(&slug) {
        return Err(not_found());
    }

    let item = ItemRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(not_found)?;

    Ok(DataResponse::new(item))
}
