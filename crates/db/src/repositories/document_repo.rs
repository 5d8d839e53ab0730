//! Repository for the `documents` table.

use clubhouse_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{
    CreateDocument, Document, DocumentListParams, ReplaceDocumentFile, UpdateDocument,
};

const COLUMNS: &str = "id, title, document_type, file_key, file_name, content_type, size_bytes, \
                       tournament_id, club_id, published_at, uploaded_by, created_at, updated_at";

/// Provides CRUD operations for uploaded documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a document row for an object that is already stored.
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (title, document_type, file_key, file_name, content_type,
                                    size_bytes, tournament_id, club_id, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.title.trim())
            .bind(&input.document_type)
            .bind(&input.file_key)
            .bind(&input.file_name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.tournament_id)
            .bind(input.club_id)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List documents, newest published first, with optional filters and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &DocumentListParams,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(params.offset);

        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.document_type.is_some() {
            conditions.push(format!("document_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.tournament_id.is_some() {
            conditions.push(format!("tournament_id = ${bind_idx}"));
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
            "SELECT {COLUMNS} FROM documents {where_clause}
             ORDER BY published_at DESC, id DESC
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Document>(&query);
        if let Some(ref document_type) = params.document_type {
            q = q.bind(document_type);
        }
        if let Some(tournament_id) = params.tournament_id {
            q = q.bind(tournament_id);
        }
        if let Some(club_id) = params.club_id {
            q = q.bind(club_id);
        }

        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update document metadata. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                title = COALESCE($2, title),
                document_type = COALESCE($3, document_type),
                tournament_id = COALESCE($4, tournament_id),
                club_id = COALESCE($5, club_id),
                published_at = COALESCE($6, published_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.document_type)
            .bind(input.tournament_id)
            .bind(input.club_id)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Point a document at a newly stored object.
    pub async fn replace_file(
        pool: &PgPool,
        id: DbId,
        input: &ReplaceDocumentFile,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                file_key = $2,
                file_name = $3,
                content_type = $4,
                size_bytes = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(&input.file_key)
            .bind(&input.file_name)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document, returning the removed row so its object can be
    /// cleaned up.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("DELETE FROM documents WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
