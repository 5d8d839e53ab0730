//! Membership payment model.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A paid membership with the club name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub club_id: DbId,
    pub club_name: String,
    pub year: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub payment_reference: String,
    pub payment_intent_id: Option<String>,
    pub payer_email: Option<String>,
    pub paid_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for membership listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipListParams {
    pub year: Option<i32>,
}

/// A member club for a given year, as shown on the public members page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberClub {
    pub club_id: DbId,
    pub name: String,
    pub slug: String,
    pub city: Option<String>,
    pub website: Option<String>,
    pub paid_at: Timestamp,
}
