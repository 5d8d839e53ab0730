//! Read-only page data for the public site, served through the page cache.
//!
//! Every handler keys the cache by its request path and query, which are the
//! same paths the admin app names when it revalidates.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::Json;
use chrono::{Datelike, Utc};
use clubhouse_core::content::validate_system_name;
use clubhouse_core::error::CoreError;
use clubhouse_core::pagination::MAX_LIMIT;
use clubhouse_db::models::club::ClubDetail;
use clubhouse_db::models::content::ContentBlock;
use clubhouse_db::models::document::{DocumentListParams, PublicDocument};
use clubhouse_db::models::photo::{PhotoListParams, PublicPhoto};
use clubhouse_db::models::tournament::{TournamentDetail, TournamentSummary};
use clubhouse_db::repositories::{
    ClubContactRepo, ClubRepo, ContentRepo, DocumentRepo, GolfCourseRepo, MembershipRepo,
    PhotoRepo, TournamentInstanceRepo, TournamentRepo,
};
use clubhouse_db::DbPool;
use clubhouse_storage::ObjectStorage;
use serde_json::Value;

use crate::cache::{page_key, to_payload};
use crate::error::{AppError, AppResult};
use crate::query::YearParams;
use crate::response::DataResponse;
use crate::state::SiteState;

type PageResponse = AppResult<Json<DataResponse<Value>>>;

/// GET /api/v1/content/{system_name}
pub async fn content(
    State(state): State<SiteState>,
    uri: Uri,
    Path(system_name): Path<String>,
) -> PageResponse {
    validate_system_name(&system_name)?;
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            let content = ContentRepo::find_by_system_name(&pool, &system_name)
                .await?
                .ok_or(AppError::Core(CoreError::NotFoundByKey {
                    entity: "Content",
                    key: system_name,
                }))?;
            to_payload(&ContentBlock::from(content))
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/tournaments
///
/// Active tournaments, each with its most recent instance.
pub async fn tournaments(State(state): State<SiteState>, uri: Uri) -> PageResponse {
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            let tournaments = TournamentRepo::list(&pool, true).await?;
            let mut latest: HashMap<_, _> = TournamentInstanceRepo::list_latest(&pool)
                .await?
                .into_iter()
                .map(|instance| (instance.tournament_id, instance))
                .collect();

            let summaries: Vec<TournamentSummary> = tournaments
                .into_iter()
                .map(|tournament| TournamentSummary {
                    latest_instance: latest.remove(&tournament.id),
                    tournament,
                })
                .collect();
            to_payload(&summaries)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/tournaments/{slug}
pub async fn tournament(
    State(state): State<SiteState>,
    uri: Uri,
    Path(slug): Path<String>,
) -> PageResponse {
    let pool = state.pool.clone();
    let storage = state.storage.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            let tournament = TournamentRepo::find_by_slug(&pool, &slug)
                .await?
                .filter(|t| t.is_active)
                .ok_or(AppError::Core(CoreError::NotFoundByKey {
                    entity: "Tournament",
                    key: slug,
                }))?;

            let instances = TournamentInstanceRepo::list_by_tournament(&pool, tournament.id).await?;
            let documents = public_documents(
                &pool,
                storage.as_ref(),
                &DocumentListParams {
                    tournament_id: Some(tournament.id),
                    limit: Some(MAX_LIMIT),
                    ..Default::default()
                },
            )
            .await?;

            to_payload(&TournamentDetail {
                tournament,
                instances,
                documents,
            })
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/clubs
pub async fn clubs(State(state): State<SiteState>, uri: Uri) -> PageResponse {
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            to_payload(&ClubRepo::list(&pool, true).await?)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/clubs/{slug}
pub async fn club(
    State(state): State<SiteState>,
    uri: Uri,
    Path(slug): Path<String>,
) -> PageResponse {
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            let club = ClubRepo::find_by_slug(&pool, &slug)
                .await?
                .filter(|c| c.is_active)
                .ok_or(AppError::Core(CoreError::NotFoundByKey {
                    entity: "Club",
                    key: slug,
                }))?;

            let contacts = ClubContactRepo::list_by_club(&pool, club.id).await?;
            let courses = GolfCourseRepo::list_by_club(&pool, club.id).await?;
            to_payload(&ClubDetail {
                club,
                contacts,
                courses,
            })
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/courses
pub async fn courses(State(state): State<SiteState>, uri: Uri) -> PageResponse {
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            to_payload(&GolfCourseRepo::list(&pool).await?)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/documents?document_type=&tournament_id=&club_id=&limit=&offset=
pub async fn documents(
    State(state): State<SiteState>,
    uri: Uri,
    Query(params): Query<DocumentListParams>,
) -> PageResponse {
    if let Some(document_type) = &params.document_type {
        clubhouse_core::assets::validate_document_type(document_type)?;
    }
    let pool = state.pool.clone();
    let storage = state.storage.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            to_payload(&public_documents(&pool, storage.as_ref(), &params).await?)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/photos?category=&tournament_instance_id=&club_id=&limit=&offset=
pub async fn photos(
    State(state): State<SiteState>,
    uri: Uri,
    Query(params): Query<PhotoListParams>,
) -> PageResponse {
    if let Some(category) = &params.category {
        clubhouse_core::assets::validate_photo_category(category)?;
    }
    let pool = state.pool.clone();
    let storage = state.storage.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            let photos: Vec<PublicPhoto> = PhotoRepo::list(&pool, &params)
                .await?
                .into_iter()
                .map(|photo| PublicPhoto {
                    url: storage.public_url(&photo.file_key),
                    photo,
                })
                .collect();
            to_payload(&photos)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/members?year=
///
/// Clubs with a paid membership for the year (default: the current year).
pub async fn members(
    State(state): State<SiteState>,
    uri: Uri,
    Query(params): Query<YearParams>,
) -> PageResponse {
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    let pool = state.pool.clone();

    let data = state
        .cache
        .get_or_load(&page_key(&uri), move || async move {
            to_payload(&MembershipRepo::member_clubs(&pool, year).await?)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

async fn public_documents(
    pool: &DbPool,
    storage: &dyn ObjectStorage,
    params: &DocumentListParams,
) -> AppResult<Vec<PublicDocument>> {
    let documents = DocumentRepo::list(pool, params).await?;
    Ok(documents
        .into_iter()
        .map(|document| PublicDocument {
            url: storage.public_url(&document.file_key),
            document,
        })
        .collect())
}
