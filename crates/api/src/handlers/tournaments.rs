//! Handlers for `/admin/tournaments` and their nested instances.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_core::slug::{resolve_slug, validate_slug};
use clubhouse_core::tournament::{validate_instance, validate_name, validate_url};
use clubhouse_core::types::DbId;
use clubhouse_db::models::tournament::{
    CreateTournament, CreateTournamentInstance, Tournament, TournamentInstance, UpdateTournament,
    UpdateTournamentInstance,
};
use clubhouse_db::repositories::{TournamentInstanceRepo, TournamentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tournaments?include_inactive=
pub async fn list_tournaments(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Tournament>>>> {
    let tournaments = TournamentRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data: tournaments }))
}

/// GET /api/v1/admin/tournaments/{id}
pub async fn get_tournament(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tournament>>> {
    let tournament = find_tournament(&state, id).await?;
    Ok(Json(DataResponse { data: tournament }))
}

/// POST /api/v1/admin/tournaments
///
/// The slug is derived from the name unless one is supplied.
pub async fn create_tournament(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateTournament>,
) -> AppResult<(StatusCode, Json<DataResponse<Tournament>>)> {
    validate_name(&input.name)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let tournament = TournamentRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(
        tournament_id = tournament.id,
        slug = %tournament.slug,
        user_id = user.user_id,
        "Tournament created"
    );

    state
        .revalidate(Target::Tournament {
            slug: &tournament.slug,
        })
        .await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: tournament })))
}

/// PUT /api/v1/admin/tournaments/{id}
pub async fn update_tournament(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateTournament>,
) -> AppResult<Json<DataResponse<Tournament>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    input.slug = normalize_slug(input.slug.take())?;

    let previous = find_tournament(&state, id).await?;
    let tournament = TournamentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tournament",
            id,
        }))?;
    tracing::info!(tournament_id = id, user_id = user.user_id, "Tournament updated");

    if previous.slug != tournament.slug {
        state
            .revalidate(Target::Tournament {
                slug: &previous.slug,
            })
            .await;
    }
    state
        .revalidate(Target::Tournament {
            slug: &tournament.slug,
        })
        .await;
    Ok(Json(DataResponse { data: tournament }))
}

/// DELETE /api/v1/admin/tournaments/{id}
///
/// Instances cascade; documents keep existing with their link cleared.
pub async fn delete_tournament(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let tournament = find_tournament(&state, id).await?;
    if !TournamentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tournament",
            id,
        }));
    }
    tracing::info!(tournament_id = id, user_id = user.user_id, "Tournament deleted");

    state
        .revalidate(Target::TournamentRemoved {
            slug: &tournament.slug,
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/tournaments/{id}/instances
pub async fn list_instances(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(tournament_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TournamentInstance>>>> {
    find_tournament(&state, tournament_id).await?;
    let instances = TournamentInstanceRepo::list_by_tournament(&state.pool, tournament_id).await?;
    Ok(Json(DataResponse { data: instances }))
}

/// POST /api/v1/admin/tournaments/{id}/instances
pub async fn create_instance(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(tournament_id): Path<DbId>,
    Json(input): Json<CreateTournamentInstance>,
) -> AppResult<(StatusCode, Json<DataResponse<TournamentInstance>>)> {
    validate_instance(input.year, input.start_date, input.end_date)?;
    validate_url("Registration URL", input.registration_url.as_deref())?;

    let tournament = find_tournament(&state, tournament_id).await?;
    let instance = TournamentInstanceRepo::create(&state.pool, tournament_id, &input).await?;
    tracing::info!(
        tournament_id,
        instance_id = instance.id,
        year = instance.year,
        user_id = user.user_id,
        "Tournament instance created"
    );

    state
        .revalidate(Target::Tournament {
            slug: &tournament.slug,
        })
        .await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: instance })))
}

/// PUT /api/v1/admin/tournaments/{id}/instances/{instance_id}
///
/// Date rules are checked against the merged result, so changing only the
/// end date still has to agree with the stored start date.
pub async fn update_instance(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((tournament_id, instance_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTournamentInstance>,
) -> AppResult<Json<DataResponse<TournamentInstance>>> {
    validate_url("Registration URL", input.registration_url.as_deref())?;

    let tournament = find_tournament(&state, tournament_id).await?;
    let existing = TournamentInstanceRepo::find_by_id(&state.pool, instance_id)
        .await?
        .filter(|i| i.tournament_id == tournament_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TournamentInstance",
            id: instance_id,
        }))?;

    validate_instance(
        input.year.unwrap_or(existing.year),
        input.start_date.or(existing.start_date),
        input.end_date.or(existing.end_date),
    )?;

    let instance = TournamentInstanceRepo::update(&state.pool, tournament_id, instance_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TournamentInstance",
            id: instance_id,
        }))?;
    tracing::info!(tournament_id, instance_id, user_id = user.user_id, "Tournament instance updated");

    state
        .revalidate(Target::Tournament {
            slug: &tournament.slug,
        })
        .await;
    Ok(Json(DataResponse { data: instance }))
}

/// DELETE /api/v1/admin/tournaments/{id}/instances/{instance_id}
pub async fn delete_instance(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((tournament_id, instance_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let tournament = find_tournament(&state, tournament_id).await?;
    if !TournamentInstanceRepo::delete(&state.pool, tournament_id, instance_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TournamentInstance",
            id: instance_id,
        }));
    }
    tracing::info!(tournament_id, instance_id, user_id = user.user_id, "Tournament instance deleted");

    state
        .revalidate(Target::Tournament {
            slug: &tournament.slug,
        })
        .await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_tournament(state: &AppState, id: DbId) -> AppResult<Tournament> {
    TournamentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tournament",
            id,
        }))
}

/// Trim an explicit slug from an update body, validating it. Blank means unchanged.
pub(crate) fn normalize_slug(slug: Option<String>) -> AppResult<Option<String>> {
    match slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(Some(slug.to_string()))
        }
        None => Ok(None),
    }
}
