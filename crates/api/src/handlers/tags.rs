//! Handlers for the per-user `/tags` resource.

use axum::extract::State;
use axum::http::StatusCode;
use thoughtcache_core::error::CoreError;
use thoughtcache_core::fields::{normalize_field_update, normalize_optional_text};
use thoughtcache_core::tags::{normalize_tag_name, validate_color, validate_tag_name};
use thoughtcache_core::types::DbId;
use thoughtcache_db::models::tag::{CreateTag, Tag, UpdateTag};
use thoughtcache_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::{Created, DataResponse};
use crate::state::AppState;

fn tag_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tag", id })
}

/// GET /api/v1/tags
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<Tag>>> {
    let tags = TagRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(DataResponse::new(tags))
}

/// POST /api/v1/tags
///
/// Duplicate names (ignoring case) are rejected with 409 by the
/// `uq_tags_user_id_name` index.
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTag>,
) -> AppResult<Created<Tag>> {
    let name = normalize_tag_name(&input.name);
    validate_tag_name(&name)?;

    let color = normalize_optional_text(input.color.as_deref());
    if let Some(color) = &color {
        validate_color(color)?;
    }

    let tag = TagRepo::create(&state.pool, auth.user_id, &name, color.as_deref()).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok(Created(tag))
}

/// PUT /api/v1/tags/{id}
///
/// Update a tag's name and/or color.
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(tag_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTag>,
) -> AppResult<DataResponse<Tag>> {
    let name = input.name.as_deref().map(normalize_tag_name);
    if let Some(name) = &name {
        validate_tag_name(name)?;
    }

    let color = normalize_field_update(input.color);
    if let Some(Some(color)) = &color {
        validate_color(color)?;
    }

    let tag = TagRepo::update(
        &state.pool,
        auth.user_id,
        tag_id,
        &UpdateTag { name, color },
    )
    .await?
    .ok_or_else(|| tag_not_found(tag_id))?;

    tracing::info!(tag_id, user_id = auth.user_id, "Tag updated");

    Ok(DataResponse::new(tag))
}

/// DELETE /api/v1/tags/{id}
///
/// Removes the tag from every item it was attached to.
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(tag_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TagRepo::delete(&state.pool, auth.user_id, tag_id).await?;
    if !deleted {
        return Err(tag_not_found(tag_id));
    }

    tracing::info!(tag_id, user_id = auth.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}
