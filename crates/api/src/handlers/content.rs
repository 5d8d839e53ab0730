//! Handlers for `/admin/content` (content editor load/save).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::content::{validate_content, validate_system_name};
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_db::models::content::{Content, ContentBlock, SaveContent};
use clubhouse_db::repositories::ContentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/content
pub async fn list_contents(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<Content>>>> {
    let contents = ContentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: contents }))
}

/// GET /api/v1/admin/content/{system_name}
///
/// A block that was never saved loads as an empty block with `id: null`,
/// so the editor can open any known system name.
pub async fn load_content(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(system_name): Path<String>,
) -> AppResult<Json<DataResponse<ContentBlock>>> {
    validate_system_name(&system_name)?;

    let block = ContentRepo::find_by_system_name(&state.pool, &system_name)
        .await?
        .map(ContentBlock::from)
        .unwrap_or_else(|| ContentBlock::empty(&system_name));

    Ok(Json(DataResponse { data: block }))
}

/// PUT /api/v1/admin/content/{system_name}
pub async fn save_content(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(system_name): Path<String>,
    Json(input): Json<SaveContent>,
) -> AppResult<Json<DataResponse<ContentBlock>>> {
    validate_system_name(&system_name)?;
    validate_content(&input.title, &input.text)?;

    let content = ContentRepo::upsert(&state.pool, &system_name, &input, user.user_id).await?;
    tracing::info!(system_name = %system_name, user_id = user.user_id, "Content saved");

    state.revalidate(Target::Content).await;
    Ok(Json(DataResponse {
        data: ContentBlock::from(content),
    }))
}

/// DELETE /api/v1/admin/content/{system_name}
pub async fn delete_content(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(system_name): Path<String>,
) -> AppResult<StatusCode> {
    validate_system_name(&system_name)?;

    if !ContentRepo::delete(&state.pool, &system_name).await? {
        return Err(AppError::Core(CoreError::NotFoundByKey {
            entity: "Content",
            key: system_name,
        }));
    }
    tracing::info!(system_name = %system_name, user_id = user.user_id, "Content deleted");

    state.revalidate(Target::Content).await;
    Ok(StatusCode::NO_CONTENT)
}
