//! Handlers for the caller's profile settings and theme preference.

use axum::extract::State;
use thoughtcache_core::error::CoreError;
use thoughtcache_core::fields::normalize_field_update;
use thoughtcache_core::theme::Theme;
use thoughtcache_db::models::profile::{ProfileSettings, ThemeSetting, UpdateProfile, UpdateTheme};
use thoughtcache_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
///
/// Returns 404 until the user has saved settings at least once.
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<ProfileSettings>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    Ok(DataResponse::new(profile.into()))
}

/// PUT /api/v1/profile
///
/// Upsert display settings. `""` and `null` clear a field; absent
/// fields are kept.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<DataResponse<ProfileSettings>> {
    let dto = UpdateProfile {
        display_name: normalize_field_update(input.display_name),
        avatar_url: normalize_field_update(input.avatar_url),
    };

    let profile = ProfileRepo::upsert_settings(&state.pool, auth.user_id, &dto).await?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(DataResponse::new(profile.into()))
}

/// GET /api/v1/profile/theme
///
/// Users without a profile get the default theme.
pub async fn get_theme(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<DataResponse<ThemeSetting>> {
    let theme = match ProfileRepo::get_theme(&state.pool, auth.user_id).await? {
        Some(stored) => stored.parse()?,
        None => Theme::default(),
    };

    Ok(DataResponse::new(ThemeSetting { theme }))
}

/// PUT /api/v1/profile/theme
pub async fn update_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateTheme>,
) -> AppResult<DataResponse<ThemeSetting>> {
    let theme: Theme = input.theme.trim().parse()?;

    let stored = ProfileRepo::upsert_theme(&state.pool, auth.user_id, theme.as_str()).await?;

    tracing::info!(user_id = auth.user_id, theme = %stored, "Theme updated");

    Ok(DataResponse::new(ThemeSetting {
        theme: stored.parse()?,
    }))
}
