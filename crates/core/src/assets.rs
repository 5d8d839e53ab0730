//! Rules for uploaded documents and photos: accepted types, size limits,
//! and object-storage key layout.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub const DOCUMENT_TYPE_BYLAWS: &str = "bylaws";
pub const DOCUMENT_TYPE_MINUTES: &str = "minutes";
pub const DOCUMENT_TYPE_FORM: &str = "form";
pub const DOCUMENT_TYPE_NEWSLETTER: &str = "newsletter";
pub const DOCUMENT_TYPE_RESULTS: &str = "results";
pub const DOCUMENT_TYPE_OTHER: &str = "other";

/// All valid document types.
pub const VALID_DOCUMENT_TYPES: &[&str] = &[
    DOCUMENT_TYPE_BYLAWS,
    DOCUMENT_TYPE_MINUTES,
    DOCUMENT_TYPE_FORM,
    DOCUMENT_TYPE_NEWSLETTER,
    DOCUMENT_TYPE_RESULTS,
    DOCUMENT_TYPE_OTHER,
];

/// MIME types accepted for document uploads.
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

/// Largest accepted document upload (20 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

/// Storage key prefix for documents.
pub const DOCUMENT_KEY_PREFIX: &str = "documents";

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

pub const PHOTO_CATEGORY_GALLERY: &str = "gallery";
pub const PHOTO_CATEGORY_COURSE: &str = "course";
pub const PHOTO_CATEGORY_TOURNAMENT: &str = "tournament";
pub const PHOTO_CATEGORY_EVENT: &str = "event";
pub const PHOTO_CATEGORY_HERO: &str = "hero";

/// All valid photo categories.
pub const VALID_PHOTO_CATEGORIES: &[&str] = &[
    PHOTO_CATEGORY_GALLERY,
    PHOTO_CATEGORY_COURSE,
    PHOTO_CATEGORY_TOURNAMENT,
    PHOTO_CATEGORY_EVENT,
    PHOTO_CATEGORY_HERO,
];

/// MIME types accepted for photo uploads.
pub const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Largest accepted photo upload (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Storage key prefix for photos.
pub const PHOTO_KEY_PREFIX: &str = "photos";

/// Maximum length of a document or photo title.
pub const MAX_TITLE_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_document_type(document_type: &str) -> Result<(), CoreError> {
    validate_one_of("document type", document_type, VALID_DOCUMENT_TYPES)
}

pub fn validate_photo_category(category: &str) -> Result<(), CoreError> {
    validate_one_of("photo category", category, VALID_PHOTO_CATEGORIES)
}

fn validate_one_of(what: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {what} '{value}'. Must be one of: {}",
            valid.join(", ")
        )))
    }
}

/// Validate an asset title (non-empty, bounded).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    crate::slug::validate_name("Title", title, MAX_TITLE_LENGTH)
}

/// Validate an upload's MIME type and size against an allow-list and limit.
///
/// Parameters after `;` (e.g. `; charset=utf-8`) are ignored.
pub fn validate_upload(
    content_type: &str,
    size: usize,
    allowed: &[&str],
    max_bytes: usize,
) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large ({size} bytes). Maximum is {max_bytes} bytes"
        )));
    }
    let essence = essence(content_type);
    if !allowed.contains(&essence.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '{essence}'"
        )));
    }
    Ok(())
}

/// Lowercased MIME type without parameters.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Reduce an uploaded file name to `[a-z0-9._-]`, keeping the extension.
///
/// Path components are dropped so `../../etc/passwd` becomes `passwd`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);

    let mut out = String::with_capacity(base.len());
    for c in base.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed = out.trim_matches(|c| c == '-' || c == '.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.chars().take(100).collect()
    }
}

/// Build a unique object key: `{prefix}/{uuid}-{sanitized name}`.
pub fn storage_key(prefix: &str, file_name: &str) -> String {
    format!(
        "{prefix}/{}-{}",
        uuid::Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

/// Public URL of a stored object given the storage base URL.
pub fn public_url(base_url: &str, file_key: &str) -> String {
    format!("{}/{file_key}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_types_and_categories() {
        assert!(validate_document_type("minutes").is_ok());
        assert!(validate_document_type("memo").is_err());
        assert!(validate_photo_category("hero").is_ok());
        assert!(validate_photo_category("selfie").is_err());
    }

    #[test]
    fn upload_limits() {
        assert!(validate_upload("application/pdf", 1024, DOCUMENT_CONTENT_TYPES, MAX_DOCUMENT_BYTES).is_ok());
        assert!(validate_upload("text/plain; charset=utf-8", 10, DOCUMENT_CONTENT_TYPES, MAX_DOCUMENT_BYTES).is_ok());
        assert!(validate_upload("application/pdf", 0, DOCUMENT_CONTENT_TYPES, MAX_DOCUMENT_BYTES).is_err());
        assert!(validate_upload("application/pdf", MAX_DOCUMENT_BYTES + 1, DOCUMENT_CONTENT_TYPES, MAX_DOCUMENT_BYTES).is_err());
        assert!(validate_upload("application/x-msdownload", 10, DOCUMENT_CONTENT_TYPES, MAX_DOCUMENT_BYTES).is_err());
        assert!(validate_upload("IMAGE/PNG", 10, PHOTO_CONTENT_TYPES, MAX_PHOTO_BYTES).is_ok());
    }

    #[test]
    fn sanitize_strips_paths_and_symbols() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\Årsmöte 2024.pdf"), "rsm-te-2024.pdf");
        assert_eq!(sanitize_file_name("Minutes (final).PDF"), "minutes-final-.pdf");
        assert_eq!(sanitize_file_name("???"), "file");
    }

    #[test]
    fn storage_key_layout() {
        let key = storage_key(DOCUMENT_KEY_PREFIX, "Bylaws.pdf");
        assert!(key.starts_with("documents/"));
        assert!(key.ends_with("-bylaws.pdf"));
        assert_ne!(key, storage_key(DOCUMENT_KEY_PREFIX, "Bylaws.pdf"));
    }

    #[test]
    fn public_url_joins_cleanly() {
        assert_eq!(
            public_url("https://cdn.example.org/", "photos/a.jpg"),
            "https://cdn.example.org/photos/a.jpg"
        );
    }
}
