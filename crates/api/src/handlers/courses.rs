//! Handlers for `/admin/courses` (golf courses, optionally linked to a club).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::club::validate_course;
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_core::types::DbId;
use clubhouse_db::models::club::{CreateGolfCourse, GolfCourse, UpdateGolfCourse};
use clubhouse_db::repositories::GolfCourseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Hole count stored when a new course does not name one.
const DEFAULT_HOLES: i16 = 18;

/// GET /api/v1/admin/courses
pub async fn list_courses(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
) -> AppResult<Json<DataResponse<Vec<GolfCourse>>>> {
    let courses = GolfCourseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /api/v1/admin/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GolfCourse>>> {
    let course = find_course(&state, id).await?;
    Ok(Json(DataResponse { data: course }))
}

/// POST /api/v1/admin/courses
pub async fn create_course(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateGolfCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<GolfCourse>>)> {
    validate_course(&input.name, input.holes.unwrap_or(DEFAULT_HOLES), input.par)?;

    let course = GolfCourseRepo::create(&state.pool, &input).await?;
    tracing::info!(course_id = course.id, club_id = ?course.club_id, user_id = user.user_id, "Golf course created");

    state.revalidate(Target::Course).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// PUT /api/v1/admin/courses/{id}
///
/// Hole count and par are validated together on the merged values.
pub async fn update_course(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGolfCourse>,
) -> AppResult<Json<DataResponse<GolfCourse>>> {
    let existing = find_course(&state, id).await?;
    validate_course(
        input.name.as_deref().unwrap_or(&existing.name),
        input.holes.unwrap_or(existing.holes),
        input.par.or(existing.par),
    )?;

    let course = GolfCourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GolfCourse",
            id,
        }))?;
    tracing::info!(course_id = id, user_id = user.user_id, "Golf course updated");

    state.revalidate(Target::Course).await;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /api/v1/admin/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GolfCourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GolfCourse",
            id,
        }));
    }
    tracing::info!(course_id = id, user_id = user.user_id, "Golf course deleted");

    state.revalidate(Target::Course).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_course(state: &AppState, id: DbId) -> AppResult<GolfCourse> {
    GolfCourseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GolfCourse",
            id,
        }))
}
