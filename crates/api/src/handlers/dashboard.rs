//! Handler for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Utc};
use clubhouse_db::models::dashboard::DashboardSummary;
use clubhouse_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
pub async fn summary(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = DashboardRepo::summary(&state.pool, Utc::now().year()).await?;
    Ok(Json(DataResponse { data: summary }))
}
