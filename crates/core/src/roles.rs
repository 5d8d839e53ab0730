//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_users.sql`.

use crate::error::CoreError;

/// Full dashboard access, including users, invitations, and memberships.
pub const ROLE_ADMIN: &str = "admin";
/// Content management only: content blocks, documents, photos, tournaments, clubs.
pub const ROLE_EDITOR: &str = "editor";

/// All roles an invitation may grant.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` may edit public site content.
pub fn can_edit_content(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}

/// Validate a role name against the known set.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
