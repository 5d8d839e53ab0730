//! Repository for the `memberships` table.

use clubhouse_core::membership::MembershipPayment;
use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::membership::{MemberClub, Membership};

/// Column list for queries selecting from `memberships m JOIN clubs c`.
const COLUMNS: &str = "m.id, m.club_id, c.name AS club_name, m.year, m.amount_cents, m.currency, \
                       m.payment_reference, m.payment_intent_id, m.payer_email, m.paid_at, \
                       m.created_at, m.updated_at";

/// Membership payments recorded from the payment webhook.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Find the membership created for a checkout session.
    pub async fn find_by_payment_reference(
        pool: &PgPool,
        payment_reference: &str,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships m JOIN clubs c ON c.id = m.club_id
             WHERE m.payment_reference = $1"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(payment_reference)
            .fetch_optional(pool)
            .await
    }

    /// Record a payment. A second insert for the same reference fails on
    /// `uq_memberships_payment_reference`.
    pub async fn create(
        pool: &PgPool,
        payment: &MembershipPayment,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO memberships (club_id, year, amount_cents, currency, payment_reference,
                                         payment_intent_id, payer_email)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN clubs c ON c.id = m.club_id"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(payment.club_id)
            .bind(payment.year)
            .bind(payment.amount_cents)
            .bind(&payment.currency)
            .bind(&payment.payment_reference)
            .bind(&payment.payment_intent_id)
            .bind(&payment.payer_email)
            .fetch_one(pool)
            .await
    }

    /// Memberships, newest payment first, optionally for a single year.
    pub async fn list(pool: &PgPool, year: Option<i32>) -> Result<Vec<Membership>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM memberships m JOIN clubs c ON c.id = m.club_id
             WHERE ($1::int IS NULL OR m.year = $1)
             ORDER BY m.paid_at DESC, m.id DESC"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    /// Whether any membership, in any year, was paid for the club.
    pub async fn exists_for_club(pool: &PgPool, club_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM memberships WHERE club_id = $1)")
            .bind(club_id)
            .fetch_one(pool)
            .await
    }

    /// Clubs with a paid membership for `year`, one row per club.
    pub async fn member_clubs(pool: &PgPool, year: i32) -> Result<Vec<MemberClub>, sqlx::Error> {
        sqlx::query_as::<_, MemberClub>(
            "SELECT c.id AS club_id, c.name, c.slug, c.city, c.website, MIN(m.paid_at) AS paid_at
             FROM memberships m JOIN clubs c ON c.id = m.club_id
             WHERE m.year = $1
             GROUP BY c.id
             ORDER BY c.name",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }
}
