//! Refresh-token sessions for admin logins.

use clubhouse_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One issued refresh token. Only the SHA-256 of the token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values recorded when a login or a refresh issues a new token.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    /// Client `User-Agent`, truncated by the caller.
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
