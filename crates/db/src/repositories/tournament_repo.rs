//! Repositories for the `tournaments` and `tournament_instances` tables.

use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::tournament::{
    CreateTournament, CreateTournamentInstance, Tournament, TournamentInstance, UpdateTournament,
    UpdateTournamentInstance,
};

const COLUMNS: &str =
    "id, name, slug, description, is_active, sort_order, created_at, updated_at";

const INSTANCE_COLUMNS: &str = "id, tournament_id, year, start_date, end_date, golf_course_id, \
                                host_club_id, registration_url, results_text, created_at, updated_at";

/// Provides CRUD operations for tournaments.
pub struct TournamentRepo;

impl TournamentRepo {
    /// Insert a tournament under an already-resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTournament,
        slug: &str,
    ) -> Result<Tournament, sqlx::Error> {
        let query = format!(
            "INSERT INTO tournaments (name, slug, description, is_active, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, true), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tournament>(&query)
            .bind(input.name.trim())
            .bind(slug)
            .bind(&input.description)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tournament>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tournaments WHERE id = $1");
        sqlx::query_as::<_, Tournament>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Tournament>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tournaments WHERE slug = $1");
        sqlx::query_as::<_, Tournament>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List tournaments by `sort_order`, then name.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Tournament>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tournaments
             WHERE ($1 = false OR is_active = true)
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Tournament>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTournament,
    ) -> Result<Option<Tournament>, sqlx::Error> {
        let query = format!(
            "UPDATE tournaments SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tournament>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tournament; its instances cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides CRUD operations for tournament editions.
pub struct TournamentInstanceRepo;

impl TournamentInstanceRepo {
    /// Instances of one tournament, newest year first.
    pub async fn list_by_tournament(
        pool: &PgPool,
        tournament_id: DbId,
    ) -> Result<Vec<TournamentInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {INSTANCE_COLUMNS} FROM tournament_instances
             WHERE tournament_id = $1
             ORDER BY year DESC"
        );
        sqlx::query_as::<_, TournamentInstance>(&query)
            .bind(tournament_id)
            .fetch_all(pool)
            .await
    }

    /// The newest instance of every tournament that has one.
    pub async fn list_latest(pool: &PgPool) -> Result<Vec<TournamentInstance>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (tournament_id) {INSTANCE_COLUMNS} FROM tournament_instances
             ORDER BY tournament_id, year DESC"
        );
        sqlx::query_as::<_, TournamentInstance>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TournamentInstance>, sqlx::Error> {
        let query = format!("SELECT {INSTANCE_COLUMNS} FROM tournament_instances WHERE id = $1");
        sqlx::query_as::<_, TournamentInstance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        tournament_id: DbId,
        input: &CreateTournamentInstance,
    ) -> Result<TournamentInstance, sqlx::Error> {
        let query = format!(
            "INSERT INTO tournament_instances
                (tournament_id, year, start_date, end_date, golf_course_id, host_club_id,
                 registration_url, results_text)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, TournamentInstance>(&query)
            .bind(tournament_id)
            .bind(input.year)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.golf_course_id)
            .bind(input.host_club_id)
            .bind(&input.registration_url)
            .bind(&input.results_text)
            .fetch_one(pool)
            .await
    }

    /// Update an instance, scoped to its tournament.
    pub async fn update(
        pool: &PgPool,
        tournament_id: DbId,
        id: DbId,
        input: &UpdateTournamentInstance,
    ) -> Result<Option<TournamentInstance>, sqlx::Error> {
        let query = format!(
            "UPDATE tournament_instances SET
                year = COALESCE($3, year),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                golf_course_id = COALESCE($6, golf_course_id),
                host_club_id = COALESCE($7, host_club_id),
                registration_url = COALESCE($8, registration_url),
                results_text = COALESCE($9, results_text)
             WHERE tournament_id = $1 AND id = $2
             RETURNING {INSTANCE_COLUMNS}"
        );
        sqlx::query_as::<_, TournamentInstance>(&query)
            .bind(tournament_id)
            .bind(id)
            .bind(input.year)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.golf_course_id)
            .bind(input.host_club_id)
            .bind(&input.registration_url)
            .bind(&input.results_text)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, tournament_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM tournament_instances WHERE tournament_id = $1 AND id = $2")
                .bind(tournament_id)
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
