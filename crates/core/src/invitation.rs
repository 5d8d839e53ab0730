//! Invitation token, status, and expiry rules.
//!
//! An invitation grants a role to an email address. The plaintext token is
//! only ever shown in the invitation link; the database stores its SHA-256
//! digest, so a leaked table cannot be used to accept invitations.

use chrono::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Length of the generated invitation token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

/// Default number of days an invitation stays valid.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Lifecycle state of an invitation, stored as text in `invitations.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Revoked,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }

    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "revoked" => Ok(Self::Revoked),
            "expired" => Ok(Self::Expired),
            other => Err(CoreError::Validation(format!(
                "Unknown invitation status '{other}'"
            ))),
        }
    }
}

/// A freshly generated invitation token.
pub struct GeneratedToken {
    /// Sent to the invitee inside the link, never stored.
    pub plaintext: String,
    /// SHA-256 hex digest, stored in `invitations.token_hash`.
    pub hash: String,
}

/// Generate a random alphanumeric invitation token and its digest.
pub fn generate_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

/// Digest used to look an invitation up by its plaintext token.
pub fn hash_token(token: &str) -> String {
    crate::hashing::sha256_hex(token.as_bytes())
}

/// Expiry timestamp for an invitation created (or re-sent) at `now`.
pub fn expires_at(now: Timestamp, expiry_days: i64) -> Timestamp {
    now + Duration::days(expiry_days)
}

/// Whether a pending invitation has passed its expiry time.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at <= now
}

/// Check that an invitation can still be accepted.
///
/// - `accepted` / `revoked` -> [`CoreError::Conflict`]
/// - `expired`, or `pending` past its expiry -> [`CoreError::Gone`]
pub fn check_usable(
    status: InvitationStatus,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    match status {
        InvitationStatus::Accepted => Err(CoreError::Conflict(
            "Invitation has already been accepted".into(),
        )),
        InvitationStatus::Revoked => Err(CoreError::Conflict("Invitation has been revoked".into())),
        InvitationStatus::Expired => Err(CoreError::Gone("Invitation has expired".into())),
        InvitationStatus::Pending if is_expired(expires_at, now) => {
            Err(CoreError::Gone("Invitation has expired".into()))
        }
        InvitationStatus::Pending => Ok(()),
    }
}

/// Build the link the invitee opens to accept.
pub fn accept_link(admin_base_url: &str, token: &str) -> String {
    format!("{}/invite/{token}", admin_base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    #[test]
    fn generated_token_shape() {
        let token = generate_token();
        assert_eq!(token.plaintext.len(), TOKEN_LENGTH);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.hash, hash_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token().plaintext, generate_token().plaintext);
    }

    #[test]
    fn status_round_trips_through_name() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Revoked,
            InvitationStatus::Expired,
        ] {
            assert_eq!(InvitationStatus::from_name(status.as_str()).unwrap(), status);
        }
        assert!(InvitationStatus::from_name("lost").is_err());
    }

    #[test]
    fn pending_and_fresh_is_usable() {
        let now = Utc::now();
        assert!(check_usable(InvitationStatus::Pending, now + Duration::hours(1), now).is_ok());
    }

    #[test]
    fn expired_invitation_fails_validation() {
        let now = Utc::now();
        let err = check_usable(InvitationStatus::Pending, now - Duration::seconds(1), now)
            .unwrap_err();
        assert_matches!(err, CoreError::Gone(_));

        let err = check_usable(InvitationStatus::Expired, now + Duration::days(1), now)
            .unwrap_err();
        assert_matches!(err, CoreError::Gone(_));
    }

    #[test]
    fn used_invitations_conflict() {
        let now = Utc::now();
        let later = now + Duration::days(1);
        assert_matches!(
            check_usable(InvitationStatus::Accepted, later, now),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            check_usable(InvitationStatus::Revoked, later, now),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn expiry_is_added_in_days() {
        let now = Utc::now();
        assert_eq!(expires_at(now, 7) - now, Duration::days(7));
    }

    #[test]
    fn accept_link_strips_trailing_slash() {
        assert_eq!(
            accept_link("https://admin.example.org/", "abc"),
            "https://admin.example.org/invite/abc"
        );
    }
}
