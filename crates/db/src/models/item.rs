//! Item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thoughtcache_core::fields::double_option;
use thoughtcache_core::types::{DbId, Timestamp};

use super::tag::TagInfo;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub source_url: Option<String>,
    pub is_starred: bool,
    pub is_public: bool,
    pub share_slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An item together with its tags, as returned by every item endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithTags {
    #[serde(flatten)]
    pub item: Item,
    pub tags: Vec<TagInfo>,
}

/// A tag joined to the item it is attached to. Used to populate
/// [`ItemWithTags::tags`] for a batch of items in one query.
#[derive(Debug, Clone, FromRow)]
pub struct ItemTagRow {
    pub item_id: DbId,
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for `POST /items`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// DTO for `PUT /items/{id}`. `tag_ids`, when present, replaces the whole
/// tag set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItem {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub source_url: Option<Option<String>>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for `PUT /items/{id}/share`. An empty body enables sharing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareItem {
    pub is_public: Option<bool>,
}
