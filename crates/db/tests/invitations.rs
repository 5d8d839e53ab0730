//! Invitation lifecycle against a real database.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use clubhouse_db::models::invitation::{AcceptInvitation, CreateInvitation};
use clubhouse_db::repositories::{AccountRepo, InvitationRepo, RoleRepo, UserRepo};

/// The inviting admin; created on first use.
async fn inviter(pool: &PgPool) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (name, email, role_id)
         VALUES ('Admin', 'admin@example.com', (SELECT id FROM roles WHERE name = 'admin'))
         ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn invite(pool: &PgPool, email: &str, hash: &str, expires_in: Duration) -> i64 {
    let invited_by = inviter(pool).await;
    let role = RoleRepo::find_by_name(pool, "editor").await.unwrap().unwrap();
    InvitationRepo::create(
        pool,
        &CreateInvitation {
            email: email.to_string(),
            token_hash: hash.to_string(),
            role_id: role.id,
            expires_at: Utc::now() + expires_in,
            invited_by,
        },
    )
    .await
    .unwrap()
    .id
}

fn acceptance() -> AcceptInvitation {
    AcceptInvitation {
        name: " New Editor ".to_string(),
        password_hash: "$argon2id$fake".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_creates_user_and_account(pool: PgPool) {
    let id = invite(&pool, "new@example.com", "hash-1", Duration::days(7)).await;

    let user = InvitationRepo::accept(&pool, id, &acceptance())
        .await
        .unwrap()
        .expect("pending invitation should be accepted");

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.name, "New Editor");
    assert_eq!(user.role, "editor");
    assert!(user.email_verified);

    let account = AccountRepo::find_credential(&pool, user.id).await.unwrap();
    assert!(account.is_some());

    let invitation = InvitationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(invitation.status, "accepted");
    assert_eq!(invitation.accepted_by, Some(user.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_twice_is_rejected(pool: PgPool) {
    let id = invite(&pool, "twice@example.com", "hash-2", Duration::days(7)).await;

    assert!(InvitationRepo::accept(&pool, id, &acceptance()).await.unwrap().is_some());
    assert!(InvitationRepo::accept(&pool, id, &acceptance()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_invitation_is_not_accepted(pool: PgPool) {
    let id = invite(&pool, "late@example.com", "hash-3", Duration::hours(-1)).await;

    assert!(InvitationRepo::accept(&pool, id, &acceptance()).await.unwrap().is_none());
    assert!(!UserRepo::email_exists(&pool, "late@example.com").await.unwrap());

    assert!(InvitationRepo::mark_expired(&pool, id).await.unwrap());
    let invitation = InvitationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(invitation.status, "expired");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_only_pending(pool: PgPool) {
    let id = invite(&pool, "gone@example.com", "hash-4", Duration::days(7)).await;

    assert!(InvitationRepo::has_open_invitation(&pool, "GONE@example.com").await.unwrap());
    let revoked = InvitationRepo::revoke(&pool, id).await.unwrap().unwrap();
    assert_eq!(revoked.status, "revoked");
    assert!(InvitationRepo::revoke(&pool, id).await.unwrap().is_none());
    assert!(!InvitationRepo::has_open_invitation(&pool, "gone@example.com").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_token_replaces_hash(pool: PgPool) {
    let id = invite(&pool, "again@example.com", "hash-5", Duration::days(1)).await;
    let new_expiry = Utc::now() + Duration::days(7);

    InvitationRepo::refresh_token(&pool, id, "hash-6", new_expiry)
        .await
        .unwrap()
        .unwrap();

    assert!(InvitationRepo::find_by_token_hash(&pool, "hash-5").await.unwrap().is_none());
    let found = InvitationRepo::find_by_token_hash(&pool, "hash-6").await.unwrap().unwrap();
    assert_eq!(found.id, id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_token_hash_violates_unique(pool: PgPool) {
    invite(&pool, "a@example.com", "same-hash", Duration::days(7)).await;
    let role = RoleRepo::find_by_name(&pool, "editor").await.unwrap().unwrap();
    let err = InvitationRepo::create(
        &pool,
        &CreateInvitation {
            email: "b@example.com".to_string(),
            token_hash: "same-hash".to_string(),
            role_id: role.id,
            expires_at: Utc::now() + Duration::days(7),
            invited_by: inviter(&pool).await,
        },
    )
    .await
    .unwrap_err();

    assert!(clubhouse_db::is_unique_violation(&err, "uq_invitations_token_hash"));
}
