//! Tag models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thoughtcache_core::fields::double_option;
use thoughtcache_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info embedded in item responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

/// DTO for `POST /tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
    pub color: Option<String>,
}

/// DTO for `PUT /tags/{id}`. Only `name` and `color` are mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
}
