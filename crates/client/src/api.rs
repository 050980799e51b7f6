use async_trait::async_trait;
use thoughtcache_core::theme::Theme;
use thoughtcache_core::types::DbId;

use crate::error::ClientError;
use crate::types::{Item, ItemChanges, NewItem, Profile, ProfileChanges, Tag, TagChanges};

/// The authenticated operations views depend on.
///
/// [`crate::http::HttpClient`] is the production implementation; tests use
/// in-memory fakes.
#[async_trait]
pub trait ThoughtCacheApi: Send + Sync {
    // Profile
    async fn get_profile(&self) -> Result<Profile, ClientError>;
    async fn update_profile(&self, changes: &ProfileChanges) -> Result<Profile, ClientError>;
    async fn get_theme(&self) -> Result<Theme, ClientError>;
    async fn update_theme(&self, theme: Theme) -> Result<Theme, ClientError>;

    // Items
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;
    async fn get_item(&self, id: DbId) -> Result<Item, ClientError>;
    async fn create_item(&self, item: &NewItem) -> Result<Item, ClientError>;
    async fn update_item(&self, id: DbId, changes: &ItemChanges) -> Result<Item, ClientError>;
    async fn delete_item(&self, id: DbId) -> Result<(), ClientError>;
    async fn toggle_star(&self, id: DbId) -> Result<Item, ClientError>;
    /// `None` publishes with the server default (public).
    async fn share_item(&self, id: DbId, is_public: Option<bool>) -> Result<Item, ClientError>;

    // Tags
    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError>;
    async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag, ClientError>;
    async fn update_tag(&self, id: DbId, changes: &TagChanges) -> Result<Tag, ClientError>;
    async fn delete_tag(&self, id: DbId) -> Result<(), ClientError>;
}
