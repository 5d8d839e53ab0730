//! Document model and DTOs.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub document_type: String,
    pub file_key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub tournament_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub published_at: Timestamp,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert input assembled by the upload handler after the object is stored.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub title: String,
    pub document_type: String,
    pub file_key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub tournament_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub uploaded_by: DbId,
}

/// Metadata update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub document_type: Option<String>,
    pub tournament_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
}

/// New file details when a document's file is replaced.
#[derive(Debug, Clone)]
pub struct ReplaceDocumentFile {
    pub file_key: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
}

/// Filters for document listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentListParams {
    pub document_type: Option<String>,
    pub tournament_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A document as served by the public site, with its download URL.
#[derive(Debug, Clone, Serialize)]
pub struct PublicDocument {
    #[serde(flatten)]
    pub document: Document,
    pub url: String,
}
