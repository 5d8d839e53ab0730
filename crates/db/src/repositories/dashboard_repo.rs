//! Aggregate counts for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::DashboardSummary;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Headline counts; memberships are counted for `year`.
    pub async fn summary(pool: &PgPool, year: i32) -> Result<DashboardSummary, sqlx::Error> {
        sqlx::query_as::<_, DashboardSummary>(
            "SELECT
                (SELECT COUNT(*) FROM tournaments) AS tournaments,
                (SELECT COUNT(*) FROM clubs) AS clubs,
                (SELECT COUNT(*) FROM documents) AS documents,
                (SELECT COUNT(*) FROM photos) AS photos,
                (SELECT COUNT(*) FROM invitations
                    WHERE status = 'pending' AND expires_at > NOW()) AS pending_invitations,
                (SELECT COUNT(*) FROM memberships WHERE year = $1) AS memberships_this_year",
        )
        .bind(year)
        .fetch_one(pool)
        .await
    }
}
