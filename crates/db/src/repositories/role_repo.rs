//! Repository for the `roles` lookup table.

use sqlx::PgPool;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, label, created_at, updated_at";

/// Read-only access to seeded roles.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }
}
