//! Membership payments are idempotent on the payment reference.

use sqlx::PgPool;

use clubhouse_core::membership::MembershipPayment;
use clubhouse_db::models::club::CreateClub;
use clubhouse_db::repositories::{ClubRepo, DashboardRepo, MembershipRepo};

fn club(name: &str) -> CreateClub {
    CreateClub {
        name: name.to_string(),
        slug: None,
        website: None,
        phone: None,
        email: None,
        address: None,
        city: Some("Uppsala".to_string()),
        postal_code: None,
        description: None,
        is_active: None,
    }
}

fn payment(club_id: i64, reference: &str) -> MembershipPayment {
    MembershipPayment {
        club_id,
        year: 2026,
        amount_cents: 150_000,
        currency: "sek".to_string(),
        payment_reference: reference.to_string(),
        payment_intent_id: Some("pi_1".to_string()),
        payer_email: Some("treasurer@example.com".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_reference_is_rejected(pool: PgPool) {
    let c = ClubRepo::create(&pool, &club("Fjällbacka GK"), "fjallbacka-gk")
        .await
        .unwrap();

    let created = MembershipRepo::create(&pool, &payment(c.id, "cs_1")).await.unwrap();
    assert_eq!(created.club_name, "Fjällbacka GK");

    let err = MembershipRepo::create(&pool, &payment(c.id, "cs_1")).await.unwrap_err();
    assert!(clubhouse_db::is_unique_violation(&err, "uq_memberships_payment_reference"));

    let all = MembershipRepo::list(&pool, Some(2026)).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_clubs_groups_by_club(pool: PgPool) {
    let a = ClubRepo::create(&pool, &club("Alpha GK"), "alpha-gk").await.unwrap();
    let b = ClubRepo::create(&pool, &club("Beta GK"), "beta-gk").await.unwrap();

    MembershipRepo::create(&pool, &payment(a.id, "cs_a1")).await.unwrap();
    MembershipRepo::create(&pool, &payment(a.id, "cs_a2")).await.unwrap();
    MembershipRepo::create(&pool, &payment(b.id, "cs_b1")).await.unwrap();

    let members = MembershipRepo::member_clubs(&pool, 2026).await.unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha GK", "Beta GK"]);

    assert!(MembershipRepo::member_clubs(&pool, 2025).await.unwrap().is_empty());

    let summary = DashboardRepo::summary(&pool, 2026).await.unwrap();
    assert_eq!(summary.clubs, 2);
    assert_eq!(summary.memberships_this_year, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_club_with_memberships_cannot_be_deleted(pool: PgPool) {
    let c = ClubRepo::create(&pool, &club("Gamma GK"), "gamma-gk").await.unwrap();
    MembershipRepo::create(&pool, &payment(c.id, "cs_g")).await.unwrap();

    let err = ClubRepo::delete(&pool, c.id).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected a foreign key violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_club_with_memberships_is_restricted(pool: PgPool) {
    let c = ClubRepo::create(&pool, &club("Kungsbacka GK"), "kungsbacka-gk")
        .await
        .unwrap();
    assert!(!MembershipRepo::exists_for_club(&pool, c.id).await.unwrap());

    MembershipRepo::create(&pool, &payment(c.id, "cs_restrict")).await.unwrap();
    assert!(MembershipRepo::exists_for_club(&pool, c.id).await.unwrap());

    let err = ClubRepo::delete(&pool, c.id).await.unwrap_err();
    assert!(clubhouse_db::is_foreign_key_violation(&err, "fk_memberships_club_id"));
}
