//! Handler for `/admin/memberships`. Rows are only created by the payment webhook.

use axum::extract::{Query, State};
use axum::Json;
use clubhouse_db::models::membership::Membership;
use clubhouse_db::repositories::MembershipRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::YearParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/memberships?year=
pub async fn list_memberships(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<YearParams>,
) -> AppResult<Json<DataResponse<Vec<Membership>>>> {
    let memberships = MembershipRepo::list(&state.pool, params.year).await?;
    Ok(Json(DataResponse { data: memberships }))
}
