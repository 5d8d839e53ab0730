//! Slug lookups for revalidating the tournament/club pages an asset appears on.
//!
//! Revalidation is best-effort, so a failed lookup is logged and the page
//! is simply not named.

use clubhouse_core::types::DbId;
use clubhouse_db::repositories::{ClubRepo, TournamentInstanceRepo, TournamentRepo};
use clubhouse_db::DbPool;

pub async fn tournament_slug(pool: &DbPool, tournament_id: Option<DbId>) -> Option<String> {
    let id = tournament_id?;
    match TournamentRepo::find_by_id(pool, id).await {
        Ok(tournament) => tournament.map(|t| t.slug),
        Err(e) => {
            tracing::warn!(tournament_id = id, error = %e, "Tournament slug lookup failed");
            None
        }
    }
}

pub async fn club_slug(pool: &DbPool, club_id: Option<DbId>) -> Option<String> {
    let id = club_id?;
    match ClubRepo::find_by_id(pool, id).await {
        Ok(club) => club.map(|c| c.slug),
        Err(e) => {
            tracing::warn!(club_id = id, error = %e, "Club slug lookup failed");
            None
        }
    }
}

/// Slug of the tournament an instance belongs to.
pub async fn instance_tournament_slug(pool: &DbPool, instance_id: Option<DbId>) -> Option<String> {
    let id = instance_id?;
    match TournamentInstanceRepo::find_by_id(pool, id).await {
        Ok(Some(instance)) => tournament_slug(pool, Some(instance.tournament_id)).await,
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(instance_id = id, error = %e, "Tournament instance lookup failed");
            None
        }
    }
}
