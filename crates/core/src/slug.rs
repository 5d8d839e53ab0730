//! URL slug generation and validation for tournaments and clubs.

use crate::error::CoreError;

/// Maximum slug length accepted from callers.
pub const MAX_SLUG_LENGTH: usize = 120;

/// Build a URL-safe slug from a display name.
///
/// Lowercases, folds common accented Latin letters to ASCII, turns every
/// other non-alphanumeric run into a single hyphen, and trims hyphens from
/// both ends. `"Höstcupen 2024 – Final"` becomes `"hostcupen-2024-final"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        let folded: &str = match c {
            'a'..='z' | '0'..='9' => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
                continue;
            }
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
            'æ' => "ae",
            'ç' => "c",
            'è' | 'é' | 'ê' | 'ë' => "e",
            'ì' | 'í' | 'î' | 'ï' => "i",
            'ñ' => "n",
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
            'ù' | 'ú' | 'û' | 'ü' => "u",
            'ý' | 'ÿ' => "y",
            'ß' => "ss",
            _ => {
                pending_hyphen = true;
                continue;
            }
        };
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push_str(folded);
    }

    slug.truncate(MAX_SLUG_LENGTH);
    slug.trim_end_matches('-').to_string()
}

/// Validate a caller-supplied slug: non-empty, `[a-z0-9-]`, no leading or
/// trailing hyphen, at most [`MAX_SLUG_LENGTH`] characters.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase letters, digits, and hyphens".into(),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(CoreError::Validation(
            "Slug must not start or end with a hyphen".into(),
        ));
    }
    Ok(())
}

/// Resolve the slug to store: the explicit one (validated) or one derived
/// from `name`. A name that yields an empty slug is a validation error.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String, CoreError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(slug.to_string())
        }
        None => {
            let slug = slugify(name);
            if slug.is_empty() {
                return Err(CoreError::Validation(
                    "Name must contain at least one letter or digit".into(),
                ));
            }
            Ok(slug)
        }
    }
}

/// Validate a display name (non-empty after trimming, at most `max` chars).
pub fn validate_name(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
