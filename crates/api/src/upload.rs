//! Multipart form parsing and object cleanup shared by document and photo uploads.

use std::collections::HashMap;

use axum::extract::Multipart;
use clubhouse_core::assets::MAX_DOCUMENT_BYTES;
use clubhouse_core::types::DbId;
use clubhouse_storage::ObjectStorage;

use crate::error::{AppError, AppResult};

/// Request body limit for upload routes: the largest file plus form overhead.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_DOCUMENT_BYTES + 1024 * 1024;

/// The `file` part of an upload form.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A parsed upload form: at most one `file` part plus text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every part of `multipart`. Unknown fields are kept as text.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "file" {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Take the required `file` part.
    pub fn take_file(&mut self) -> AppResult<UploadedFile> {
        self.file
            .take()
            .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))
    }

    /// A trimmed text field; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require_text(&self, name: &str) -> AppResult<&str> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required '{name}' field")))
    }

    /// An optional numeric id field.
    pub fn optional_id(&self, name: &str) -> AppResult<Option<DbId>> {
        self.text(name)
            .map(|v| {
                v.parse::<DbId>()
                    .map_err(|_| AppError::BadRequest(format!("'{name}' must be a number")))
            })
            .transpose()
    }

    pub fn optional_i32(&self, name: &str) -> AppResult<Option<i32>> {
        self.text(name)
            .map(|v| {
                v.parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("'{name}' must be a number")))
            })
            .transpose()
    }
}

/// Delete a stored object, logging instead of failing.
///
/// Used after the database already reflects the removal, so a leftover
/// object is an orphan rather than a broken row.
pub async fn delete_object_best_effort(storage: &dyn ObjectStorage, key: &str) {
    match storage.delete(key).await {
        Ok(()) => tracing::debug!(key, "Stored object deleted"),
        Err(e) => tracing::warn!(key, error = %e, "Failed to delete stored object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            file: None,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn blank_text_is_absent() {
        let form = form(&[("title", "  "), ("document_type", " minutes ")]);
        assert_eq!(form.text("title"), None);
        assert_eq!(form.text("document_type"), Some("minutes"));
        assert!(form.require_text("title").is_err());
    }

    #[test]
    fn optional_ids_parse() {
        let form = form(&[("club_id", "12"), ("tournament_id", ""), ("bad", "x")]);
        assert_eq!(form.optional_id("club_id").unwrap(), Some(12));
        assert_eq!(form.optional_id("tournament_id").unwrap(), None);
        assert_eq!(form.optional_id("missing").unwrap(), None);
        assert!(form.optional_id("bad").is_err());
    }

    #[test]
    fn missing_file_is_bad_request() {
        let mut form = form(&[]);
        assert!(matches!(form.take_file(), Err(AppError::BadRequest(_))));
    }
}
