//! Club, club contact and golf course models.

use clubhouse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clubs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Club {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a club. `slug` is derived from `name` when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClub {
    pub name: String,
    pub slug: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating a club. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClub {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A row from the `club_contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClubContact {
    pub id: DbId,
    pub club_id: DbId,
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClubContact {
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClubContact {
    pub name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sort_order: Option<i32>,
}

/// A row from the `golf_courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GolfCourse {
    pub id: DbId,
    pub club_id: Option<DbId>,
    pub name: String,
    pub holes: i16,
    pub par: Option<i16>,
    pub length_meters: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGolfCourse {
    pub club_id: Option<DbId>,
    pub name: String,
    pub holes: Option<i16>,
    pub par: Option<i16>,
    pub length_meters: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGolfCourse {
    pub club_id: Option<DbId>,
    pub name: Option<String>,
    pub holes: Option<i16>,
    pub par: Option<i16>,
    pub length_meters: Option<i32>,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Public club page: the club with its contacts and courses.
#[derive(Debug, Clone, Serialize)]
pub struct ClubDetail {
    #[serde(flatten)]
    pub club: Club,
    pub contacts: Vec<ClubContact>,
    pub courses: Vec<GolfCourse>,
}
