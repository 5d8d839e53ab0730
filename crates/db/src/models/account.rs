//! Login account model (one per user and provider).

use clubhouse_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Provider name for email + password accounts.
pub const PROVIDER_CREDENTIAL: &str = "credential";

/// A row from the `accounts` table. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub user_id: DbId,
    pub provider: String,
    pub password_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
