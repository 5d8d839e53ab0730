//! Repository for the `accounts` table.

use clubhouse_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::account::{Account, PROVIDER_CREDENTIAL};

const COLUMNS: &str = "id, user_id, provider, password_hash, created_at, updated_at";

/// Access to login credentials.
pub struct AccountRepo;

impl AccountRepo {
    /// Create the email + password account for a user.
    pub async fn create_credential(
        conn: &mut PgConnection,
        user_id: DbId,
        password_hash: &str,
    ) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (user_id, provider, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(user_id)
            .bind(PROVIDER_CREDENTIAL)
            .bind(password_hash)
            .fetch_one(conn)
            .await
    }

    /// The credential account of a user, if one exists.
    pub async fn find_credential(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM accounts WHERE user_id = $1 AND provider = $2");
        sqlx::query_as::<_, Account>(&query)
            .bind(user_id)
            .bind(PROVIDER_CREDENTIAL)
            .fetch_optional(pool)
            .await
    }

    /// Replace the password hash. Returns `true` if the account existed.
    pub async fn update_password(
        pool: &PgPool,
        user_id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $3 WHERE user_id = $1 AND provider = $2",
        )
        .bind(user_id)
        .bind(PROVIDER_CREDENTIAL)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
