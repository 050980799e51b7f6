//! Handlers for the `/items` resource: authoring, starring, deleting and
//! sharing. Every item is scoped to the authenticated owner; items owned by
//! someone else are reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use thoughtcache_core::error::CoreError;
use thoughtcache_core::fields::{normalize_field_update, normalize_optional_text};
use thoughtcache_core::items::{validate_item_type, validate_title, DEFAULT_ITEM_TYPE};
use thoughtcache_core::types::DbId;
use thoughtcache_db::models::item::{CreateItem, ItemWithTags, ShareItem, UpdateItem};
use thoughtcache_db::repositories::item_repo::NewItem;
use thoughtcache_db::repositories::{ItemRepo, TagRepo};
use thoughtcache_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, OptionalJson};
use crate::middleware::auth::AuthUser;
use crate::response::{Created, DataResponse};
use crate::state::AppState;

fn item_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Item", id })
}

/// Deduplicate `tag_ids` and make sure every one belongs to the user.
async fn owned_tag_ids(pool: &DbPool, user_id: DbId, tag_ids: &[DbId]) -> AppResult<Vec<DbId>> {
    let mut ids = tag_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(ids);
    }

    let owned = TagRepo::count_owned(pool, user_id, &ids).await?;
    if owned != ids.len() as i64 {
        return Err(AppError::BadRequest(
            "One or more tags do not exist".into(),
        ));
    }
    Ok(ids)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/items
pub async fn list_items(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<ItemWithTags>>> {
    let items = ItemRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(DataResponse::new(items))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<DataResponse<ItemWithTags>> {
    let item = ItemRepo::find_for_user(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;
    Ok(DataResponse::new(item))
}

// ---------------------------------------------------------------------------
// Authoring
// ---------------------------------------------------------------------------

/// POST /api/v1/items
pub async fn create_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateItem>,
) -> AppResult<Created<ItemWithTags>> {
    let title = input.title.trim();
    validate_title(title)?;

    let item_type = input
        .item_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_ITEM_TYPE);
    validate_item_type(item_type)?;

    let source_url = normalize_optional_text(input.source_url.as_deref());
    let tag_ids = owned_tag_ids(&state.pool, auth.user_id, &input.tag_ids).await?;

    let item = ItemRepo::create(
        &state.pool,
        auth.user_id,
        &NewItem {
            title,
            content: &input.content,
            item_type,
            source_url: source_url.as_deref(),
            tag_ids: &tag_ids,
        },
    )
    .await?;

    tracing::info!(item_id = item.item.id, user_id = auth.user_id, "Item created");

    Ok(Created(item))
}

/// PUT /api/v1/items/{id}
///
/// Partial update. `tag_ids`, when present, replaces the item's whole tag set.
pub async fn update_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateItem>,
) -> AppResult<DataResponse<ItemWithTags>> {
    let title = input.title.map(|t| t.trim().to_string());
    if let Some(title) = &title {
        validate_title(title)?;
    }

    let item_type = input.item_type.map(|t| t.trim().to_string());
    if let Some(item_type) = &item_type {
        validate_item_type(item_type)?;
    }

    let tag_ids = match &input.tag_ids {
        Some(ids) => Some(owned_tag_ids(&state.pool, auth.user_id, ids).await?),
        None => None,
    };

    let dto = UpdateItem {
        title,
        content: input.content,
        item_type,
        source_url: normalize_field_update(input.source_url),
        tag_ids,
    };

    let item = ItemRepo::update(&state.pool, auth.user_id, id, &dto)
        .await?
        .ok_or_else(|| item_not_found(id))?;

    tracing::info!(item_id = id, user_id = auth.user_id, "Item updated");

    Ok(DataResponse::new(item))
}

/// DELETE /api/v1/items/{id}
pub async fn delete_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ItemRepo::delete(&state.pool, auth.user_id, id).await?;
    if !deleted {
        return Err(item_not_found(id));
    }

    tracing::info!(item_id = id, user_id = auth.user_id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Star / share
// ---------------------------------------------------------------------------

/// PATCH|PUT /api/v1/items/{id}/star
pub async fn toggle_star(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<DataResponse<ItemWithTags>> {
    let item = ItemRepo::toggle_star(&state.pool, auth.user_id, id)
        .await?
        .ok_or_else(|| item_not_found(id))?;

    tracing::debug!(
        item_id = id,
        is_starred = item.item.is_starred,
        "Item star toggled"
    );

    Ok(DataResponse::new(item))
}

/// PUT /api/v1/items/{id}/share
///
/// An empty body or `{"is_public": true}` publishes the item (generating a
/// slug on first share); `{"is_public": false}` unpublishes it and keeps the
/// slug.
pub async fn share_item(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    OptionalJson(input): OptionalJson<ShareItem>,
) -> AppResult<DataResponse<ItemWithTags>> {
    let is_public = input.and_then(|body| body.is_public).unwrap_or(true);

    let item = if is_public {
        ItemRepo::enable_sharing(&state.pool, auth.user_id, id).await?
    } else {
        ItemRepo::disable_sharing(&state.pool, auth.user_id, id).await?
    }
    .ok_or_else(|| item_not_found(id))?;

    tracing::info!(
        item_id = id,
        user_id = auth.user_id,
        is_public,
        slug = item.item.share_slug.as_deref().unwrap_or(""),
        "Item sharing updated"
    );

    Ok(DataResponse::new(item))
}
