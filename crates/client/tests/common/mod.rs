//! In-memory stand-ins for the API, the notifier and the clipboard.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use thoughtcache_client::api::ThoughtCacheApi;
use thoughtcache_client::error::ClientError;
use thoughtcache_client::session::{Clipboard, NoticeKind, Notifier, Session};
use thoughtcache_client::theme::{DocumentRoot, MemoryPreferenceStore};
use thoughtcache_client::types::{
    Item, ItemChanges, NewItem, Profile, ProfileChanges, Tag, TagChanges, TagRef,
};
use thoughtcache_core::theme::Theme;
use thoughtcache_core::types::DbId;

pub const ORIGIN: &str = "https://thoughtcache.test";

#[derive(Default)]
struct FakeState {
    items: Vec<Item>,
    tags: Vec<Tag>,
    next_id: DbId,
    theme: Option<Theme>,
    profile: Option<Profile>,
    /// `get_item` reads needed before a freshly shared item gets its slug.
    slug_delay: usize,
    fail_theme: bool,
    calls: Vec<&'static str>,
}

/// Server stand-in that keeps items and tags in memory.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

fn not_found(what: &str, id: DbId) -> ClientError {
    ClientError::Api {
        status: 404,
        error: format!("{what} with id {id} not found"),
        message: None,
    }
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_slug_delay(&self, reads: usize) {
        self.state.lock().unwrap().slug_delay = reads;
    }

    pub fn fail_theme_requests(&self) {
        self.state.lock().unwrap().fail_theme = true;
    }

    pub fn set_server_theme(&self, theme: Theme) {
        self.state.lock().unwrap().theme = Some(theme);
    }

    pub fn server_theme(&self) -> Option<Theme> {
        self.state.lock().unwrap().theme
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == name)
            .count()
    }

    pub fn seed_tag(&self, name: &str) -> Tag {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let tag = Tag {
            id: state.next_id,
            name: name.to_string(),
            color: None,
            created_at: Utc::now(),
        };
        state.tags.push(tag.clone());
        tag
    }

    pub fn seed_item(&self, title: &str, content: &str, tags: &[&Tag], is_public: bool) -> Item {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let now = Utc::now();
        let id = state.next_id;
        let item = Item {
            id,
            title: title.to_string(),
            content: content.to_string(),
            item_type: "note".to_string(),
            source_url: None,
            is_starred: false,
            is_public,
            share_slug: is_public.then(|| format!("seeded{id:06}")),
            tags: tags
                .iter()
                .map(|t| TagRef {
                    id: t.id,
                    name: t.name.clone(),
                    color: t.color.clone(),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        // Newest first, like the server.
        state.items.insert(0, item.clone());
        item
    }

    /// Make an item public without a slug, as if generation lagged.
    pub fn publish_without_slug(&self, id: DbId) {
        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
            item.is_public = true;
            item.share_slug = None;
        }
    }
}

#[async_trait]
impl ThoughtCacheApi for FakeApi {
    async fn get_profile(&self) -> Result<Profile, ClientError> {
        let state = self.state.lock().unwrap();
        state.profile.clone().ok_or_else(|| not_found("Profile", 1))
    }

    async fn update_profile(&self, changes: &ProfileChanges) -> Result<Profile, ClientError> {
        let mut state = self.state.lock().unwrap();
        let mut profile = state.profile.clone().unwrap_or(Profile {
            display_name: None,
            avatar_url: None,
        });
        if let Some(v) = &changes.display_name {
            profile.display_name = v.clone();
        }
        if let Some(v) = &changes.avatar_url {
            profile.avatar_url = v.clone();
        }
        state.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn get_theme(&self) -> Result<Theme, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_theme");
        if state.fail_theme {
            return Err(ClientError::Api {
                status: 500,
                error: "Database operation failed".into(),
                message: Some("connection refused".into()),
            });
        }
        Ok(state.theme.unwrap_or_default())
    }

    async fn update_theme(&self, theme: Theme) -> Result<Theme, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("update_theme");
        if state.fail_theme {
            return Err(ClientError::Api {
                status: 500,
                error: "Database operation failed".into(),
                message: Some("connection refused".into()),
            });
        }
        state.theme = Some(theme);
        Ok(theme)
    }

    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("list_items");
        Ok(state.items.clone())
    }

    async fn get_item(&self, id: DbId) -> Result<Item, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("get_item");
        let delay_done = if state.slug_delay > 0 {
            state.slug_delay -= 1;
            state.slug_delay == 0
        } else {
            true
        };
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Item", id))?;
        if item.is_public && item.share_slug.is_none() && delay_done {
            item.share_slug = Some(format!("late{id:08}"));
        }
        Ok(item.clone())
    }

    async fn create_item(&self, new: &NewItem) -> Result<Item, ClientError> {
        Ok(self.seed_item(&new.title, &new.content, &[], false))
    }

    async fn update_item(&self, id: DbId, changes: &ItemChanges) -> Result<Item, ClientError> {
        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Item", id))?;
        if let Some(title) = &changes.title {
            item.title = title.clone();
        }
        if let Some(content) = &changes.content {
            item.content = content.clone();
        }
        Ok(item.clone())
    }

    async fn delete_item(&self, id: DbId) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("delete_item");
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(not_found("Item", id));
        }
        Ok(())
    }

    async fn toggle_star(&self, id: DbId) -> Result<Item, ClientError> {
        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Item", id))?;
        item.is_starred = !item.is_starred;
        Ok(item.clone())
    }

    async fn share_item(&self, id: DbId, is_public: Option<bool>) -> Result<Item, ClientError> {
        let mut state = self.state.lock().unwrap();
        let lagging = state.slug_delay > 0;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Item", id))?;
        item.is_public = is_public.unwrap_or(true);
        if item.is_public && item.share_slug.is_none() && !lagging {
            item.share_slug = Some(format!("share{id:07}"));
        }
        Ok(item.clone())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("list_tags");
        let mut tags = state.tags.clone();
        tags.sort_by_key(|t| t.name.to_lowercase());
        Ok(tags)
    }

    async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag, ClientError> {
        {
            let mut state = self.state.lock().unwrap();
            state.calls.push("create_tag");
            if state
                .tags
                .iter()
                .any(|t| t.name.to_lowercase() == name.to_lowercase())
            {
                return Err(ClientError::Api {
                    status: 409,
                    error: "A tag with this name already exists".into(),
                    message: None,
                });
            }
        }
        let mut tag = self.seed_tag(name);
        tag.color = color.map(str::to_string);
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.tags.iter_mut().find(|t| t.id == tag.id) {
            stored.color = tag.color.clone();
        }
        Ok(tag)
    }

    async fn update_tag(&self, id: DbId, changes: &TagChanges) -> Result<Tag, ClientError> {
        let mut state = self.state.lock().unwrap();
        let tag = state
            .tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Tag", id))?;
        if let Some(name) = &changes.name {
            tag.name = name.clone();
        }
        if let Some(color) = &changes.color {
            tag.color = color.clone();
        }
        Ok(tag.clone())
    }

    async fn delete_tag(&self, id: DbId) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.tags.retain(|t| t.id != id);
        for item in &mut state.items {
            item.tags.retain(|t| t.id != id);
        }
        Ok(())
    }
}

/// Notifier that records every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<(NoticeKind, String)> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == NoticeKind::Error)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }
}

/// Clipboard that keeps the last text, or refuses every write.
#[derive(Default)]
pub struct FakeClipboard {
    pub text: Mutex<Option<String>>,
    pub broken: bool,
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClientError> {
        if self.broken {
            return Err(ClientError::Clipboard("permission denied".into()));
        }
        *self.text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub root: Arc<DocumentRoot>,
    pub session: Session,
}

pub fn harness() -> Harness {
    harness_with_store(Arc::new(MemoryPreferenceStore::default()))
}

pub fn harness_with_store(store: Arc<MemoryPreferenceStore>) -> Harness {
    let api = FakeApi::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let root = Arc::new(DocumentRoot::default());
    let session = Session::init(
        api.clone(),
        store,
        root.clone(),
        notifier.clone(),
        ORIGIN,
    );
    Harness {
        api,
        notifier,
        root,
        session,
    }
}
