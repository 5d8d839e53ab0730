//! Content block model.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub system_name: String,
    pub title: String,
    pub text: String,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of a content save request.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveContent {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// What the editor loads for a system name.
///
/// A block that was never saved comes back with `id = None` and empty fields
/// so the editor can start from scratch.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBlock {
    pub id: Option<DbId>,
    pub system_name: String,
    pub title: String,
    pub text: String,
    pub updated_at: Option<Timestamp>,
}

impl ContentBlock {
    pub fn empty(system_name: &str) -> Self {
        Self {
            id: None,
            system_name: system_name.to_string(),
            title: String::new(),
            text: String::new(),
            updated_at: None,
        }
    }
}

impl From<Content> for ContentBlock {
    fn from(c: Content) -> Self {
        Self {
            id: Some(c.id),
            system_name: c.system_name,
            title: c.title,
            text: c.text,
            updated_at: Some(c.updated_at),
        }
    }
}
