//! Public items with a local search box.

use thoughtcache_core::types::DbId;

use super::{copy_share_url, resolve_share_url};
use crate::error::ClientError;
use crate::session::{Clipboard, Session};
use crate::types::Item;

/// Items whose title, content or any tag name contains `query`, ignoring
/// case. A blank query matches everything.
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&query)
                || item.content.to_lowercase().contains(&query)
                || item
                    .tags
                    .iter()
                    .any(|t| t.name.to_lowercase().contains(&query))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct SharedView {
    items: Vec<Item>,
    query: String,
}

impl SharedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Public items matching the current query.
    pub fn visible(&self) -> Vec<&Item> {
        filter_items(&self.items, &self.query)
    }

    /// Reload the user's items and keep the public ones.
    pub async fn refresh(&mut self, session: &Session) -> Result<(), ClientError> {
        match session.api().list_items().await {
            Ok(items) => {
                self.items = items.into_iter().filter(|i| i.is_public).collect();
                Ok(())
            }
            Err(e) => {
                session.report("load shared items", &e);
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

    /// Stop sharing an item; it leaves this view on refresh.
    pub async fn unshare(&mut self, session: &Session, id: DbId) -> Result<(), ClientError> {
        match session.api().share_item(id, Some(false)).await {
            Ok(_) => {
                session.notify_success("Item is no longer shared");
                self.refresh(session).await
            }
            Err(e) => {
                session.report("unshare item", &e);
                Err(e)
            }
        }
    }

    /// Copy the public link of an item already in the view.
    ///
    /// Items that are public but have no slug yet are re-fetched until the
    /// slug appears.
    pub async fn copy_link(
        &mut self,
        session: &Session,
        clipboard: &dyn Clipboard,
        id: DbId,
    ) -> Result<String, ClientError> {
        let Some(item) = self.items.iter().find(|i| i.id == id).cloned() else {
            let err = ClientError::Validation(format!("Item {id} is not shared"));
            session.report("copy share link", &err);
            return Err(err);
        };
        let had_slug = item.share_slug.is_some();

        let result = async {
            let url = resolve_share_url(session, item).await?;
            copy_share_url(session, clipboard, &url)?;
            Ok::<_, ClientError>(url)
        }
        .await;

        match result {
            Ok(url) => {
                if !had_slug {
                    self.refresh(session).await?;
                }
                Ok(url)
            }
            Err(e) => {
                session.report("copy share link", &e);
                Err(e)
            }
        }
    }
}
