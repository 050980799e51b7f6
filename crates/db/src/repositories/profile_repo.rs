//! Repository for the `profiles` table.
//!
//! Profiles are never inserted explicitly: every write is an upsert keyed on
//! `user_id`, so the first settings change creates the row.

use sqlx::PgPool;
use thoughtcache_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries.
const COLUMNS: &str = "id, user_id, display_name, avatar_url, theme, created_at, updated_at";

/// Provides data access for user profiles and theme preferences.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Get the profile for a user.
    ///
    /// Returns `None` if the user has never saved any settings.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or partially update the display settings for a user.
    ///
    /// Only fields that are `Some` in `dto` are written; the inner value is
    /// stored as given (callers normalize blank strings to `None` first).
    pub async fn upsert_settings(
        pool: &PgPool,
        user_id: DbId,
        dto: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, display_name, avatar_url) \
             VALUES ($1, $3, $5) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 display_name = CASE WHEN $2 THEN EXCLUDED.display_name \
                                     ELSE profiles.display_name END, \
                 avatar_url = CASE WHEN $4 THEN EXCLUDED.avatar_url \
                                   ELSE profiles.avatar_url END \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(dto.display_name.is_some())
            .bind(dto.display_name.clone().flatten())
            .bind(dto.avatar_url.is_some())
            .bind(dto.avatar_url.clone().flatten())
            .fetch_one(pool)
            .await
    }

    /// Get the stored theme for a user, if a profile row exists.
    pub async fn get_theme(pool: &PgPool, user_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT theme FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update the theme for a user, leaving other settings alone.
    pub async fn upsert_theme(
        pool: &PgPool,
        user_id: DbId,
        theme: &str,
    ) -> Result<String, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "INSERT INTO profiles (user_id, theme) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET theme = EXCLUDED.theme \
             RETURNING theme",
        )
        .bind(user_id)
        .bind(theme)
        .fetch_one(pool)
        .await
    }
}
