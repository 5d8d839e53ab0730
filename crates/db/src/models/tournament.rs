//! Tournament and tournament instance models.

use chrono::NaiveDate;
use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::document::PublicDocument;

/// A row from the `tournaments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tournament {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTournament {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTournament {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// A row from the `tournament_instances` table: one edition of a tournament.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TournamentInstance {
    pub id: DbId,
    pub tournament_id: DbId,
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub golf_course_id: Option<DbId>,
    pub host_club_id: Option<DbId>,
    pub registration_url: Option<String>,
    pub results_text: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTournamentInstance {
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub golf_course_id: Option<DbId>,
    pub host_club_id: Option<DbId>,
    pub registration_url: Option<String>,
    pub results_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTournamentInstance {
    pub year: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub golf_course_id: Option<DbId>,
    pub host_club_id: Option<DbId>,
    pub registration_url: Option<String>,
    pub results_text: Option<String>,
}

/// Public listing row: a tournament with its most recent edition, if any.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentSummary {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub latest_instance: Option<TournamentInstance>,
}

/// Public tournament page.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentDetail {
    #[serde(flatten)]
    pub tournament: Tournament,
    /// Newest first.
    pub instances: Vec<TournamentInstance>,
    pub documents: Vec<PublicDocument>,
}
