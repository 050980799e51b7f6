//! Repository for the `items` and `item_tags` tables.
//!
//! Every read returns [`ItemWithTags`]; tags for a batch of items are loaded
//! with a single join query and grouped in memory.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use thoughtcache_core::sharing::{generate_share_slug, MAX_SLUG_ATTEMPTS};
use thoughtcache_core::types::DbId;

use crate::models::item::{Item, ItemTagRow, ItemWithTags, UpdateItem};
use crate::models::tag::TagInfo;

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "\
    id, user_id, title, content, item_type, source_url, is_starred, \
    is_public, share_slug, created_at, updated_at";

/// Unique constraint guarding share slugs.
const SHARE_SLUG_CONSTRAINT: &str = "uq_items_share_slug";

/// Fields of a new item after validation and normalization.
#[derive(Debug, Clone)]
pub struct NewItem<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub item_type: &'a str,
    pub source_url: Option<&'a str>,
    pub tag_ids: &'a [DbId],
}

/// Provides CRUD, starring and sharing operations for items.
pub struct ItemRepo;

impl ItemRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List all items owned by a user, newest first, with tags populated.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ItemWithTags>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Self::attach_tags(pool, items).await
    }

    /// Find an item owned by a user.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1 AND user_id = $2");
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Self::with_tags_opt(pool, item).await
    }

    /// Find a publicly shared item by its slug, regardless of owner.
    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE share_slug = $1 AND is_public = true"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Self::with_tags_opt(pool, item).await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new item and its tag associations in one transaction.
    ///
    /// Tag ownership must be checked by the caller.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewItem<'_>,
    ) -> Result<ItemWithTags, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO items (user_id, title, content, item_type, source_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(user_id)
            .bind(input.title)
            .bind(input.content)
            .bind(input.item_type)
            .bind(input.source_url)
            .fetch_one(&mut *tx)
            .await?;

        insert_item_tags(&mut tx, item.id, input.tag_ids).await?;
        tx.commit().await?;

        Self::with_tags(pool, item).await
    }

    /// Partially update an item. Absent fields are left untouched;
    /// `source_url: Some(None)` clears the column; `tag_ids: Some(_)`
    /// replaces the tag set.
    ///
    /// Returns `None` if no item with the given ID is owned by the user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        dto: &UpdateItem,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE items SET \
                 title = COALESCE($3, title), \
                 content = COALESCE($4, content), \
                 item_type = COALESCE($5, item_type), \
                 source_url = CASE WHEN $6 THEN $7 ELSE source_url END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        let Some(item) = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .bind(dto.title.as_deref())
            .bind(dto.content.as_deref())
            .bind(dto.item_type.as_deref())
            .bind(dto.source_url.is_some())
            .bind(dto.source_url.clone().flatten())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(tag_ids) = &dto.tag_ids {
            sqlx::query("DELETE FROM item_tags WHERE item_id = $1")
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
            insert_item_tags(&mut tx, item.id, tag_ids).await?;
        }

        tx.commit().await?;
        Self::with_tags(pool, item).await.map(Some)
    }

    /// Delete an item. Cascade deletes its tag associations.
    ///
    /// Returns `true` if an item was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip `is_starred` in a single statement.
    pub async fn toggle_star(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET is_starred = NOT is_starred \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Self::with_tags_opt(pool, item).await
    }

    // -----------------------------------------------------------------------
    // Sharing
    // -----------------------------------------------------------------------

    /// Mark an item public, generating a share slug if it has none.
    ///
    /// An existing slug is kept. A freshly generated slug that collides with
    /// another item's is replaced and the update retried, up to
    /// [`MAX_SLUG_ATTEMPTS`] times.
    pub async fn enable_sharing(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        Self::enable_sharing_with(pool, user_id, id, generate_share_slug).await
    }

    /// [`enable_sharing`](Self::enable_sharing) with the slug source supplied
    /// by the caller. `next_slug` is called once per attempt.
    pub async fn enable_sharing_with(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        mut next_slug: impl FnMut() -> String,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET is_public = true, share_slug = COALESCE(share_slug, $3) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;
            let slug = next_slug();
            let result = sqlx::query_as::<_, Item>(&query)
                .bind(id)
                .bind(user_id)
                .bind(&slug)
                .fetch_optional(pool)
                .await;

            match result {
                Ok(item) => return Self::with_tags_opt(pool, item).await,
                Err(e) if is_slug_collision(&e) && attempt < MAX_SLUG_ATTEMPTS => {
                    tracing::warn!(item_id = id, attempt, "Share slug collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Mark an item private. The slug is kept so re-sharing reuses the URL.
    pub async fn disable_sharing(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET is_public = false \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Self::with_tags_opt(pool, item).await
    }

    // -----------------------------------------------------------------------
    // Tag population
    // -----------------------------------------------------------------------

    async fn with_tags(pool: &PgPool, item: Item) -> Result<ItemWithTags, sqlx::Error> {
        let mut items = Self::attach_tags(pool, vec![item]).await?;
        // attach_tags maps one-to-one over its input.
        Ok(items.remove(0))
    }

    async fn with_tags_opt(
        pool: &PgPool,
        item: Option<Item>,
    ) -> Result<Option<ItemWithTags>, sqlx::Error> {
        match item {
            Some(item) => Self::with_tags(pool, item).await.map(Some),
            None => Ok(None),
        }
    }

    /// Load the tags for a batch of items and pair them up, preserving the
    /// input order.
    async fn attach_tags(
        pool: &PgPool,
        items: Vec<Item>,
    ) -> Result<Vec<ItemWithTags>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        let rows = sqlx::query_as::<_, ItemTagRow>(
            "SELECT it.item_id, t.id, t.name, t.color \
             FROM item_tags it \
             JOIN tags t ON t.id = it.tag_id \
             WHERE it.item_id = ANY($1) \
             ORDER BY lower(t.name), t.name",
        )
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut by_item: HashMap<DbId, Vec<TagInfo>> = HashMap::new();
        for row in rows {
            by_item.entry(row.item_id).or_default().push(TagInfo {
                id: row.id,
                name: row.name,
                color: row.color,
            });
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let tags = by_item.remove(&item.id).unwrap_or_default();
                ItemWithTags { item, tags }
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_item_tags(
    conn: &mut PgConnection,
    item_id: DbId,
    tag_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO item_tags (item_id, tag_id) \
         SELECT $1, UNNEST($2::BIGINT[]) \
         ON CONFLICT DO NOTHING",
    )
    .bind(item_id)
    .bind(tag_ids)
    .execute(conn)
    .await?;
    Ok(())
}

fn is_slug_collision(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(SHARE_SLUG_CONSTRAINT))
}
