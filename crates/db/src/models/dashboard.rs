//! Admin dashboard summary.

use serde::Serialize;
use sqlx::FromRow;

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardSummary {
    pub tournaments: i64,
    pub clubs: i64,
    pub documents: i64,
    pub photos: i64,
    pub pending_invitations: i64,
    pub memberships_this_year: i64,
}
