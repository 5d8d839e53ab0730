//! Content block rules.
//!
//! A content block is a titled piece of text on the public site identified
//! by its *system name* (for example `home_intro` or `membership-terms`).

use crate::error::CoreError;

/// Maximum length of a content system name.
pub const MAX_SYSTEM_NAME_LENGTH: usize = 100;

/// Maximum length of a content title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a content body.
pub const MAX_TEXT_LENGTH: usize = 100_000;

/// Validate a system name: 1..=100 chars of `[a-z0-9_-]`.
pub fn validate_system_name(system_name: &str) -> Result<(), CoreError> {
    if system_name.is_empty() {
        return Err(CoreError::Validation("System name must not be empty".into()));
    }
    if system_name.len() > MAX_SYSTEM_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "System name must be at most {MAX_SYSTEM_NAME_LENGTH} characters"
        )));
    }
    if !system_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(
            "System name must contain only lowercase letters, digits, '_' and '-'".into(),
        ));
    }
    Ok(())
}

/// Validate the editable part of a content block before it is saved.
pub fn validate_content(title: &str, text: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    if text.len() > MAX_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Text must be at most {MAX_TEXT_LENGTH} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn system_name_accepts_snake_and_kebab() {
        assert!(validate_system_name("home_intro").is_ok());
        assert!(validate_system_name("membership-terms-2025").is_ok());
    }

    #[test]
    fn system_name_rejects_bad_input() {
        assert!(validate_system_name("").is_err());
        assert!(validate_system_name("Home Intro").is_err());
        assert!(validate_system_name("../etc").is_err());
        assert!(validate_system_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = validate_content("   ", "body").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Title must not be empty");
    }

    #[test]
    fn long_title_is_rejected() {
        assert!(validate_content(&"t".repeat(201), "").is_err());
        assert!(validate_content(&"t".repeat(200), "").is_ok());
    }

    #[test]
    fn empty_text_is_allowed() {
        assert!(validate_content("Welcome", "").is_ok());
    }
}
