//! Repository for the `invitations` table.

use clubhouse_core::invitation::InvitationStatus;
use clubhouse_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::invitation::{AcceptInvitation, CreateInvitation, Invitation};
use crate::models::user::{CreateUser, User};
use crate::repositories::{AccountRepo, UserRepo};

/// Column list for queries selecting from `invitations i JOIN roles r`.
const COLUMNS: &str = "i.id, i.email, i.token_hash, i.role_id, r.name AS role, i.status, \
                       i.expires_at, i.invited_by, i.accepted_by, i.accepted_at, \
                       i.created_at, i.updated_at";

/// Provides invitation lifecycle queries.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Insert a new pending invitation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInvitation,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                INSERT INTO invitations (email, token_hash, role_id, expires_at, invited_by)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM i JOIN roles r ON r.id = i.role_id"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(&input.email)
            .bind(&input.token_hash)
            .bind(input.role_id)
            .bind(input.expires_at)
            .bind(input.invited_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations i JOIN roles r ON r.id = i.role_id WHERE i.id = $1"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up an invitation by the SHA-256 of its token.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations i JOIN roles r ON r.id = i.role_id
             WHERE i.token_hash = $1"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// List invitations, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations i JOIN roles r ON r.id = i.role_id
             WHERE ($1::text IS NULL OR i.status = $1)
             ORDER BY i.created_at DESC, i.id DESC"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(status.map(InvitationStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Whether a pending, unexpired invitation exists for this email.
    pub async fn has_open_invitation(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM invitations
                WHERE lower(email) = lower($1) AND status = 'pending' AND expires_at > NOW()
             )",
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Flip a pending invitation to `expired`. Returns `true` if the row changed.
    pub async fn mark_expired(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitations SET status = 'expired' WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke a pending invitation.
    ///
    /// Returns `None` when the invitation does not exist or is not pending.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                UPDATE invitations SET status = 'revoked'
                WHERE id = $1 AND status = 'pending'
                RETURNING *
             )
             SELECT {COLUMNS} FROM i JOIN roles r ON r.id = i.role_id"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the token and expiry of a pending invitation.
    ///
    /// Returns `None` when the invitation does not exist or is not pending.
    pub async fn refresh_token(
        pool: &PgPool,
        id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                UPDATE invitations SET token_hash = $2, expires_at = $3
                WHERE id = $1 AND status = 'pending'
                RETURNING *
             )
             SELECT {COLUMNS} FROM i JOIN roles r ON r.id = i.role_id"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invitation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Accept an invitation in one transaction: create the user and its
    /// credential account, then mark the invitation accepted.
    ///
    /// The invitation row is locked first. Returns `None` (and changes
    /// nothing) when it is no longer pending or has expired in the meantime.
    pub async fn accept(
        pool: &PgPool,
        invitation_id: DbId,
        input: &AcceptInvitation,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(String, DbId)> = sqlx::query_as(
            "SELECT email, role_id FROM invitations
             WHERE id = $1 AND status = 'pending' AND expires_at > NOW()
             FOR UPDATE",
        )
        .bind(invitation_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((email, role_id)) = locked else {
            return Ok(None);
        };

        let user = UserRepo::create(
            &mut *tx,
            &CreateUser {
                name: input.name.trim().to_string(),
                email,
                role_id,
                email_verified: true,
            },
        )
        .await?;

        AccountRepo::create_credential(&mut *tx, user.id, &input.password_hash).await?;

        sqlx::query(
            "UPDATE invitations SET status = 'accepted', accepted_by = $2, accepted_at = NOW()
             WHERE id = $1",
        )
        .bind(invitation_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(user))
    }
}
