//! Repository for the `photos` table.

use clubhouse_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo, PhotoListParams, ReplacePhotoFile, UpdatePhoto};

const COLUMNS: &str = "id, title, description, category, file_key, content_type, size_bytes, \
                       width, height, tournament_instance_id, club_id, sort_order, uploaded_by, \
                       created_at, updated_at";

/// Provides CRUD operations for uploaded photos.
pub struct PhotoRepo;

impl PhotoRepo {
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (title, description, category, file_key, content_type, size_bytes,
                                 width, height, tournament_instance_id, club_id, sort_order,
                                 uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.file_key)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .bind(input.tournament_instance_id)
            .bind(input.club_id)
            .bind(input.sort_order)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List photos by `sort_order`, newest first within a position.
    pub async fn list(pool: &PgPool, params: &PhotoListParams) -> Result<Vec<Photo>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);

        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.tournament_instance_id.is_some() {
            conditions.push(format!("tournament_instance_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.club_id.is_some() {
            conditions.push(format!("club_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM photos {where_clause}
             ORDER BY sort_order, created_at DESC, id DESC
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Photo>(&query);
        if let Some(ref category) = params.category {
            q = q.bind(category);
        }
        if let Some(instance_id) = params.tournament_instance_id {
            q = q.bind(instance_id);
        }
        if let Some(club_id) = params.club_id {
            q = q.bind(club_id);
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePhoto,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                tournament_instance_id = COALESCE($5, tournament_instance_id),
                club_id = COALESCE($6, club_id),
                sort_order = COALESCE($7, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.tournament_instance_id)
            .bind(input.club_id)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn replace_file(
        pool: &PgPool,
        id: DbId,
        input: &ReplacePhotoFile,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE photos SET
                file_key = $2,
                content_type = $3,
                size_bytes = $4,
                width = $5,
                height = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(&input.file_key)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .fetch_optional(pool)
            .await
    }

    /// Delete a photo, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("DELETE FROM photos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
