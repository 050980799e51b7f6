//! Items grouped by tag.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use thoughtcache_core::types::DbId;

use super::{copy_share_url, resolve_share_url};
use crate::error::ClientError;
use crate::session::{Clipboard, Session};
use crate::types::{Item, Tag};

/// One tag and the items carrying it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    pub tag: Tag,
    pub items: Vec<Item>,
}

/// Group `items` under each tag they carry.
///
/// Empty groups are dropped. Groups are ordered by tag name using root-locale
/// collation that ignores case but not accents, so `Éclair` sorts between
/// `apple` and `zebra`. Ties are broken by the raw name. Item order within a
/// group follows `items`. An item with several tags appears in several
/// groups.
pub fn group_by_tag(tags: &[Tag], items: &[Item]) -> Vec<TagGroup> {
    let mut groups: Vec<TagGroup> = tags
        .iter()
        .map(|tag| TagGroup {
            tag: tag.clone(),
            items: items.iter().filter(|i| i.has_tag(tag.id)).cloned().collect(),
        })
        .filter(|g| !g.items.is_empty())
        .collect();

    let collator = tag_name_collator();
    groups.sort_by(|a, b| compare_tag_names(collator.as_ref(), &a.tag.name, &b.tag.name));
    groups
}

fn tag_name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options)
        .map_err(|e| tracing::warn!(error = %e, "Collator unavailable, ordering tags by lowercase name"))
        .ok()
}

fn compare_tag_names(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let ordering = match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    ordering.then_with(|| a.cmp(b))
}

#[derive(Debug, Default)]
pub struct CollectionsView {
    items: Vec<Item>,
    tags: Vec<Tag>,
    groups: Vec<TagGroup>,
}

impl CollectionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Fetch tags and items concurrently and rebuild the groups.
    ///
    /// On failure the previous state is kept and the error is reported.
    pub async fn refresh(&mut self, session: &Session) -> Result<(), ClientError> {
        let api = session.api();
        match tokio::try_join!(api.list_tags(), api.list_items()) {
            Ok((tags, items)) => {
                self.groups = group_by_tag(&tags, &items);
                self.tags = tags;
                self.items = items;
                Ok(())
            }
            Err(e) => {
                session.report("load collections", &e);
                Err(e)
            }
        }
    }

    pub async fn toggle_star(&mut self, session: &Session, id: DbId) -> Result<(), ClientError> {
        match session.api().toggle_star(id).await {
            Ok(item) => {
                session.notify_success(if item.is_starred {
                    "Added to starred"
                } else {
                    "Removed from starred"
                });
                self.refresh(session).await
            }
            Err(e) => {
                session.report("toggle star", &e);
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, session: &Session, id: DbId) -> Result<(), ClientError> {
        match session.api().delete_item(id).await {
            Ok(()) => {
                session.notify_success("Item deleted successfully");
                self.refresh(session).await
            }
            Err(e) => {
                session.report("delete item", &e);
                Err(e)
            }
        }
    }

    /// Publish an item, copy its share link and refresh.
    ///
    /// Once the server has accepted the share the view is refreshed even if
    /// resolving or copying the link fails afterwards.
    pub async fn share(
        &mut self,
        session: &Session,
        clipboard: &dyn Clipboard,
        id: DbId,
    ) -> Result<String, ClientError> {
        let item = match session.api().share_item(id, None).await {
            Ok(item) => item,
            Err(e) => {
                session.report("share item", &e);
                return Err(e);
            }
        };

        let copied = async {
            let url = resolve_share_url(session, item).await?;
            copy_share_url(session, clipboard, &url)?;
            Ok::<_, ClientError>(url)
        }
        .await;

        let refreshed = self.refresh(session).await;

        match copied {
            Ok(url) => {
                refreshed?;
                Ok(url)
            }
            Err(e) => {
                session.report("share item", &e);
                Err(e)
            }
        }
    }
}
