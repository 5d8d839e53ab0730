//! Repository for the `contents` table.

use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{Content, SaveContent};

const COLUMNS: &str = "id, system_name, title, text, updated_by, created_at, updated_at";

/// Load/save access to content blocks keyed by system name.
pub struct ContentRepo;

impl ContentRepo {
    pub async fn find_by_system_name(
        pool: &PgPool,
        system_name: &str,
    ) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE system_name = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(system_name)
            .fetch_optional(pool)
            .await
    }

    /// All blocks ordered by system name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents ORDER BY system_name");
        sqlx::query_as::<_, Content>(&query).fetch_all(pool).await
    }

    /// Insert or overwrite the block for `system_name`.
    ///
    /// Uses `ON CONFLICT (system_name) DO UPDATE` so there is one row per name.
    pub async fn upsert(
        pool: &PgPool,
        system_name: &str,
        input: &SaveContent,
        updated_by: DbId,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents (system_name, title, text, updated_by)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (system_name) DO UPDATE
             SET title = EXCLUDED.title,
                 text = EXCLUDED.text,
                 updated_by = EXCLUDED.updated_by
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(system_name)
            .bind(input.title.trim())
            .bind(&input.text)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }

    /// Delete a block. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, system_name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE system_name = $1")
            .bind(system_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
