//! Repositories for the `clubs` and `club_contacts` tables.

use clubhouse_core::types::DbId;
use sqlx::PgPool;

use crate::models::club::{
    Club, ClubContact, CreateClub, CreateClubContact, UpdateClub, UpdateClubContact,
};

const COLUMNS: &str = "id, name, slug, website, phone, email, address, city, postal_code, \
                       description, is_active, created_at, updated_at";

const CONTACT_COLUMNS: &str =
    "id, club_id, name, position, email, phone, sort_order, created_at, updated_at";

/// Provides CRUD operations for clubs.
pub struct ClubRepo;

impl ClubRepo {
    /// Insert a club under an already-resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreateClub,
        slug: &str,
    ) -> Result<Club, sqlx::Error> {
        let query = format!(
            "INSERT INTO clubs (name, slug, website, phone, email, address, city, postal_code,
                                description, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(input.name.trim())
            .bind(slug)
            .bind(&input.website)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs WHERE id = $1");
        sqlx::query_as::<_, Club>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Club>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clubs WHERE slug = $1");
        sqlx::query_as::<_, Club>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List clubs by name. `active_only` hides deactivated clubs.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Club>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clubs
             WHERE ($1 = false OR is_active = true)
             ORDER BY name"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a club. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClub,
    ) -> Result<Option<Club>, sqlx::Error> {
        let query = format!(
            "UPDATE clubs SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                website = COALESCE($4, website),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                address = COALESCE($7, address),
                city = COALESCE($8, city),
                postal_code = COALESCE($9, postal_code),
                description = COALESCE($10, description),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Club>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.slug)
            .bind(&input.website)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a club. Fails with a foreign-key violation while memberships
    /// reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Provides CRUD operations for a club's contact people.
pub struct ClubContactRepo;

impl ClubContactRepo {
    pub async fn list_by_club(
        pool: &PgPool,
        club_id: DbId,
    ) -> Result<Vec<ClubContact>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS} FROM club_contacts
             WHERE club_id = $1
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, ClubContact>(&query)
            .bind(club_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        club_id: DbId,
        input: &CreateClubContact,
    ) -> Result<ClubContact, sqlx::Error> {
        let query = format!(
            "INSERT INTO club_contacts (club_id, name, position, email, phone, sort_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0))
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ClubContact>(&query)
            .bind(club_id)
            .bind(input.name.trim())
            .bind(&input.position)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Update a contact. The `club_id` scopes the lookup so a contact can
    /// only be edited through its own club.
    pub async fn update(
        pool: &PgPool,
        club_id: DbId,
        id: DbId,
        input: &UpdateClubContact,
    ) -> Result<Option<ClubContact>, sqlx::Error> {
        let query = format!(
            "UPDATE club_contacts SET
                name = COALESCE($3, name),
                position = COALESCE($4, position),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                sort_order = COALESCE($7, sort_order)
             WHERE club_id = $1 AND id = $2
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ClubContact>(&query)
            .bind(club_id)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.position)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, club_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM club_contacts WHERE club_id = $1 AND id = $2")
            .bind(club_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
