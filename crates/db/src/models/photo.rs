//! Photo model and DTOs.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: i32,
    pub height: i32,
    pub tournament_instance_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub sort_order: i32,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: i32,
    pub height: i32,
    pub tournament_instance_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub sort_order: i32,
    pub uploaded_by: DbId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhoto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tournament_instance_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct ReplacePhotoFile {
    pub file_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoListParams {
    pub category: Option<String>,
    pub tournament_instance_id: Option<DbId>,
    pub club_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicPhoto {
    #[serde(flatten)]
    pub photo: Photo,
    pub url: String,
}
