//! Invitation model and DTOs.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An invitation row with the invited role's name joined in.
///
/// Only the SHA-256 of the token is stored; the plaintext is returned once
/// at creation and sent by email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invitation {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub role_id: DbId,
    pub role: String,
    pub status: String,
    pub expires_at: Timestamp,
    pub invited_by: Option<DbId>,
    pub accepted_by: Option<DbId>,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert input for a new invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub email: String,
    pub token_hash: String,
    pub role_id: DbId,
    pub expires_at: Timestamp,
    pub invited_by: DbId,
}

/// Query parameters for listing invitations.
#[derive(Debug, Default, Deserialize)]
pub struct InvitationListParams {
    pub status: Option<String>,
}

/// The user and credential created when an invitation is accepted.
#[derive(Debug, Clone)]
pub struct AcceptInvitation {
    pub name: String,
    pub password_hash: String,
}
