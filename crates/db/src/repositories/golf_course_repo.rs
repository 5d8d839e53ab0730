//! Repository for the `golf_courses` table.

use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::club::{CreateGolfCourse, GolfCourse, UpdateGolfCourse};

const COLUMNS: &str = "id, club_id, name, holes, par, length_meters, address, city, \
                       created_at, updated_at";

/// Default hole count for a new course.
const DEFAULT_HOLES: i16 = 18;

/// Provides CRUD operations for golf courses.
pub struct GolfCourseRepo;

impl GolfCourseRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGolfCourse,
    ) -> Result<GolfCourse, sqlx::Error> {
        let query = format!(
            "INSERT INTO golf_courses (club_id, name, holes, par, length_meters, address, city)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GolfCourse>(&query)
            .bind(input.club_id)
            .bind(input.name.trim())
            .bind(input.holes.unwrap_or(DEFAULT_HOLES))
            .bind(input.par)
            .bind(input.length_meters)
            .bind(&input.address)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GolfCourse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM golf_courses WHERE id = $1");
        sqlx::query_as::<_, GolfCourse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All courses ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<GolfCourse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM golf_courses ORDER BY name");
        sqlx::query_as::<_, GolfCourse>(&query).fetch_all(pool).await
    }

    pub async fn list_by_club(
        pool: &PgPool,
        club_id: DbId,
    ) -> Result<Vec<GolfCourse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM golf_courses WHERE club_id = $1 ORDER BY name");
        sqlx::query_as::<_, GolfCourse>(&query)
            .bind(club_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGolfCourse,
    ) -> Result<Option<GolfCourse>, sqlx::Error> {
        let query = format!(
            "UPDATE golf_courses SET
                club_id = COALESCE($2, club_id),
                name = COALESCE($3, name),
                holes = COALESCE($4, holes),
                par = COALESCE($5, par),
                length_meters = COALESCE($6, length_meters),
                address = COALESCE($7, address),
                city = COALESCE($8, city)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GolfCourse>(&query)
            .bind(id)
            .bind(input.club_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.holes)
            .bind(input.par)
            .bind(input.length_meters)
            .bind(&input.address)
            .bind(&input.city)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM golf_courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
