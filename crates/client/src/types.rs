//! Wire types as seen by the client.

use serde::{Deserialize, Serialize};
use thoughtcache_core::theme::Theme;
use thoughtcache_core::types::{DbId, Timestamp};

/// `{ "data": ... }` success envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Tag summary embedded in an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: DbId,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub source_url: Option<String>,
    pub is_starred: bool,
    pub is_public: bool,
    pub share_slug: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    pub fn has_tag(&self, tag_id: DbId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThemeSetting {
    pub theme: Theme,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub id: DbId,
    pub email: String,
}

/// Response of signup and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_in: i64,
    pub user: AccountInfo,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /items`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewItem {
    pub title: String,
    pub content: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub tag_ids: Vec<DbId>,
}

/// Body of `PUT /items/{id}`. `None` fields are omitted and left untouched
/// by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// `Some(None)` clears the URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<DbId>>,
}

/// Body of `POST /tags` and `PUT /tags/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
}

/// Body of `PUT /profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<Option<String>>,
}
