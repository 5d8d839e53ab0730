//! Handlers for `/admin/clubs` and their nested contacts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::club::{validate_club_name, validate_contact};
use clubhouse_core::contact::validate_email;
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_core::slug::resolve_slug;
use clubhouse_core::tournament::validate_url;
use clubhouse_core::types::DbId;
use clubhouse_db::models::club::{
    Club, ClubContact, CreateClub, CreateClubContact, UpdateClub, UpdateClubContact,
};
use clubhouse_db::is_foreign_key_violation;
use clubhouse_db::repositories::{ClubContactRepo, ClubRepo, MembershipRepo};

use super::tournaments::normalize_slug;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Foreign key that keeps paid memberships from losing their club.
const MEMBERSHIP_CLUB_CONSTRAINT: &str = "fk_memberships_club_id";

const CLUB_HAS_MEMBERSHIPS: &str = "Club has recorded memberships and cannot be deleted";

// ---------------------------------------------------------------------------
// Clubs
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/clubs?include_inactive=
pub async fn list_clubs(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Club>>>> {
    let clubs = ClubRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data: clubs }))
}

/// GET /api/v1/admin/clubs/{id}
pub async fn get_club(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Club>>> {
    let club = find_club(&state, id).await?;
    Ok(Json(DataResponse { data: club }))
}

/// POST /api/v1/admin/clubs
pub async fn create_club(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Json(input): Json<CreateClub>,
) -> AppResult<(StatusCode, Json<DataResponse<Club>>)> {
    validate_club_name(&input.name)?;
    validate_club_fields(input.website.as_deref(), input.email.as_deref())?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name)?;

    let club = ClubRepo::create(&state.pool, &input, &slug).await?;
    tracing::info!(club_id = club.id, slug = %club.slug, user_id = user.user_id, "Club created");

    state.revalidate(Target::Club { slug: &club.slug }).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: club })))
}

/// PUT /api/v1/admin/clubs/{id}
pub async fn update_club(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateClub>,
) -> AppResult<Json<DataResponse<Club>>> {
    if let Some(name) = &input.name {
        validate_club_name(name)?;
    }
    validate_club_fields(input.website.as_deref(), input.email.as_deref())?;
    input.slug = normalize_slug(input.slug.take())?;

    let previous = find_club(&state, id).await?;
    let club = ClubRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Club", id }))?;
    tracing::info!(club_id = id, user_id = user.user_id, "Club updated");

    if previous.slug != club.slug {
        state.revalidate(Target::Club { slug: &previous.slug }).await;
    }
    state.revalidate(Target::Club { slug: &club.slug }).await;
    Ok(Json(DataResponse { data: club }))
}

/// DELETE /api/v1/admin/clubs/{id}
///
/// Contacts cascade and courses are unlinked. A club with recorded
/// memberships cannot be deleted (409).
pub async fn delete_club(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let club = find_club(&state, id).await?;
    if MembershipRepo::exists_for_club(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(CLUB_HAS_MEMBERSHIPS.into())));
    }

    // A payment can land between the check and the delete.
    let deleted = ClubRepo::delete(&state.pool, id).await.map_err(|e| {
        if is_foreign_key_violation(&e, MEMBERSHIP_CLUB_CONSTRAINT) {
            AppError::Core(CoreError::Conflict(CLUB_HAS_MEMBERSHIPS.into()))
        } else {
            AppError::from(e)
        }
    })?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Club", id }));
    }
    tracing::info!(club_id = id, user_id = user.user_id, "Club deleted");

    state.revalidate(Target::ClubRemoved { slug: &club.slug }).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/clubs/{id}/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(club_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ClubContact>>>> {
    find_club(&state, club_id).await?;
    let contacts = ClubContactRepo::list_by_club(&state.pool, club_id).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /api/v1/admin/clubs/{id}/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(club_id): Path<DbId>,
    Json(input): Json<CreateClubContact>,
) -> AppResult<(StatusCode, Json<DataResponse<ClubContact>>)> {
    validate_contact(&input.name, input.email.as_deref())?;

    let club = find_club(&state, club_id).await?;
    let contact = ClubContactRepo::create(&state.pool, club_id, &input).await?;
    tracing::info!(club_id, contact_id = contact.id, user_id = user.user_id, "Club contact created");

    state.revalidate(Target::Club { slug: &club.slug }).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// PUT /api/v1/admin/clubs/{id}/contacts/{contact_id}
pub async fn update_contact(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((club_id, contact_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateClubContact>,
) -> AppResult<Json<DataResponse<ClubContact>>> {
    if let Some(name) = &input.name {
        validate_contact(name, None)?;
    }
    if let Some(email) = input.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }

    let club = find_club(&state, club_id).await?;
    let contact = ClubContactRepo::update(&state.pool, club_id, contact_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ClubContact",
            id: contact_id,
        }))?;
    tracing::info!(club_id, contact_id, user_id = user.user_id, "Club contact updated");

    state.revalidate(Target::Club { slug: &club.slug }).await;
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/admin/clubs/{id}/contacts/{contact_id}
pub async fn delete_contact(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path((club_id, contact_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let club = find_club(&state, club_id).await?;
    if !ClubContactRepo::delete(&state.pool, club_id, contact_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ClubContact",
            id: contact_id,
        }));
    }
    tracing::info!(club_id, contact_id, user_id = user.user_id, "Club contact deleted");

    state.revalidate(Target::Club { slug: &club.slug }).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_club(state: &AppState, id: DbId) -> AppResult<Club> {
    ClubRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Club", id }))
}

fn validate_club_fields(website: Option<&str>, email: Option<&str>) -> Result<(), CoreError> {
    validate_url("Website", website)?;
    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    Ok(())
}
