//! Repository for the `tags` table.
//!
//! Names are unique per user ignoring case (`uq_tags_user_id_name`); a
//! violating insert or rename surfaces as a database unique violation.

use sqlx::PgPool;
use thoughtcache_core::types::DbId;

use crate::models::tag::{Tag, UpdateTag};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, user_id, name, color, created_at, updated_at";

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (user_id, name, color) \
             VALUES ($1, $2, $3) \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
    }

    /// List all tags owned by a user, ordered by name ignoring case.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags \
             WHERE user_id = $1 \
             ORDER BY lower(name), name"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a tag owned by a user.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Count how many of `ids` exist and belong to the user.
    pub async fn count_owned(
        pool: &PgPool,
        user_id: DbId,
        ids: &[DbId],
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tags WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids)
        .fetch_one(pool)
        .await
    }

    /// Partially update a tag's `name` and/or `color`.
    ///
    /// Returns `None` if no tag with the given ID is owned by the user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        dto: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET \
                 name = COALESCE($3, name), \
                 color = CASE WHEN $4 THEN $5 ELSE color END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(user_id)
            .bind(dto.name.as_deref())
            .bind(dto.color.is_some())
            .bind(dto.color.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag. Cascade deletes its item associations.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
