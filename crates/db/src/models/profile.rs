//! Profile (display settings + theme) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thoughtcache_core::fields::double_option;
use thoughtcache_core::theme::Theme;
use thoughtcache_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The public projection returned by `GET/PUT /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<Profile> for ProfileSettings {
    fn from(p: Profile) -> Self {
        Self {
            display_name: p.display_name,
            avatar_url: p.avatar_url,
        }
    }
}

/// DTO for `PUT /profile`. Absent fields are left untouched; `null` and
/// blank strings clear the column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    #[serde(default, deserialize_with = "double_option")]
    pub display_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

/// Body of `GET/PUT /profile/theme` responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThemeSetting {
    pub theme: Theme,
}

/// DTO for `PUT /profile/theme`. Kept as text so an unknown value yields a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTheme {
    pub theme: String,
}
