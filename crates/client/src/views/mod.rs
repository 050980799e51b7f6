//! View state derived from server lists.
//!
//! Every mutation is followed by a full re-fetch, and derived lists (tag
//! groups, search results) are recomputed from scratch.

pub mod collections;
pub mod shared;
pub mod tags;

use std::time::Duration;

use thoughtcache_core::types::DbId;

use crate::error::ClientError;
use crate::session::{Clipboard, Session};
use crate::types::Item;

/// How many times to re-read an item that is public but has no slug yet.
pub const SHARE_SLUG_ATTEMPTS: usize = 5;

/// Pause between those re-reads.
pub const SHARE_SLUG_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Resolve the public URL of `item`, re-fetching it while it is public but
/// still missing its slug.
pub(crate) async fn resolve_share_url(session: &Session, item: Item) -> Result<String, ClientError> {
    let id = item.id;
    let mut current = item;
    let mut attempt = 0;

    loop {
        if let (true, Some(slug)) = (current.is_public, current.share_slug.as_deref()) {
            return Ok(session.share_url(slug));
        }
        if !current.is_public || attempt >= SHARE_SLUG_ATTEMPTS {
            return Err(missing_slug(id));
        }

        attempt += 1;
        tracing::debug!(item_id = id, attempt, "Share slug not ready, re-fetching item");
        tokio::time::sleep(SHARE_SLUG_RETRY_DELAY).await;
        current = session.api().get_item(id).await?;
    }
}

fn missing_slug(id: DbId) -> ClientError {
    ClientError::Decode(format!("Failed to generate share link for item {id}"))
}

/// Copy `url` to the clipboard and confirm.
pub(crate) fn copy_share_url(
    session: &Session,
    clipboard: &dyn Clipboard,
    url: &str,
) -> Result<(), ClientError> {
    clipboard.write_text(url)?;
    session.notify_success("Share link copied to clipboard!");
    Ok(())
}
