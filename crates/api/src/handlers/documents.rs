//! Handlers for `/admin/documents` (uploaded PDFs and office files).
//!
//! The stored object and the row are kept in step: an upload whose insert
//! fails deletes the object again, and replacing or deleting a document
//! deletes the old object once the row no longer points at it. Object
//! cleanup is best-effort.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::assets::{
    essence, storage_key, validate_document_type, validate_title, validate_upload,
    DOCUMENT_CONTENT_TYPES, DOCUMENT_KEY_PREFIX, MAX_DOCUMENT_BYTES,
};
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_core::types::DbId;
use clubhouse_db::models::document::{
    CreateDocument, Document, DocumentListParams, ReplaceDocumentFile, UpdateDocument,
};
use clubhouse_db::repositories::DocumentRepo;

use super::associations::{club_slug, tournament_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{delete_object_best_effort, UploadForm, UploadedFile};

/// GET /api/v1/admin/documents?document_type=&tournament_id=&club_id=&limit=&offset=
pub async fn list_documents(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<DocumentListParams>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    if let Some(document_type) = &params.document_type {
        validate_document_type(document_type)?;
    }
    let documents = DocumentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: documents }))
}

/// GET /api/v1/admin/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Document>>> {
    let document = find_document(&state, id).await?;
    Ok(Json(DataResponse { data: document }))
}

/// POST /api/v1/admin/documents
///
/// Multipart form: `file`, `title`, `document_type`, optional
/// `tournament_id` and `club_id`.
pub async fn upload_document(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;

    let title = form.require_text("title")?.to_string();
    validate_title(&title)?;
    let document_type = form.require_text("document_type")?.to_string();
    validate_document_type(&document_type)?;
    let tournament_id = form.optional_id("tournament_id")?;
    let club_id = form.optional_id("club_id")?;

    let stored = store_file(&state, file).await?;

    let input = CreateDocument {
        title,
        document_type,
        file_key: stored.file_key.clone(),
        file_name: stored.file_name,
        content_type: stored.content_type,
        size_bytes: stored.size_bytes,
        tournament_id,
        club_id,
        uploaded_by: user.user_id,
    };

    let document = match DocumentRepo::create(&state.pool, &input).await {
        Ok(document) => document,
        Err(e) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        document_id = document.id,
        file_key = %document.file_key,
        size_bytes = document.size_bytes,
        user_id = user.user_id,
        "Document uploaded"
    );

    revalidate_document(&state, &document).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// PUT /api/v1/admin/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<DataResponse<Document>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(document_type) = &input.document_type {
        validate_document_type(document_type)?;
    }

    let previous = find_document(&state, id).await?;
    let document = DocumentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    tracing::info!(document_id = id, user_id = user.user_id, "Document updated");

    if (previous.tournament_id, previous.club_id) != (document.tournament_id, document.club_id) {
        revalidate_document(&state, &previous).await;
    }
    revalidate_document(&state, &document).await;
    Ok(Json(DataResponse { data: document }))
}

/// PUT /api/v1/admin/documents/{id}/file
///
/// Multipart form with a single `file` part.
pub async fn replace_document_file(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Document>>> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;

    let previous = find_document(&state, id).await?;
    let stored = store_file(&state, file).await?;

    let input = ReplaceDocumentFile {
        file_key: stored.file_key.clone(),
        file_name: stored.file_name,
        content_type: stored.content_type,
        size_bytes: stored.size_bytes,
    };

    let document = match DocumentRepo::replace_file(&state.pool, id, &input).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Document",
                id,
            }));
        }
        Err(e) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(e.into());
        }
    };
    delete_object_best_effort(state.storage.as_ref(), &previous.file_key).await;
    tracing::info!(
        document_id = id,
        old_key = %previous.file_key,
        new_key = %document.file_key,
        user_id = user.user_id,
        "Document file replaced"
    );

    revalidate_document(&state, &document).await;
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/admin/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = DocumentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    delete_object_best_effort(state.storage.as_ref(), &document.file_key).await;
    tracing::info!(document_id = id, user_id = user.user_id, "Document deleted");

    revalidate_document(&state, &document).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct StoredFile {
    file_key: String,
    file_name: String,
    content_type: String,
    size_bytes: i64,
}

/// Validate an uploaded document and put it in object storage.
async fn store_file(state: &AppState, file: UploadedFile) -> AppResult<StoredFile> {
    let content_type = essence(&file.content_type);
    validate_upload(
        &content_type,
        file.data.len(),
        DOCUMENT_CONTENT_TYPES,
        MAX_DOCUMENT_BYTES,
    )?;

    let file_key = storage_key(DOCUMENT_KEY_PREFIX, &file.file_name);
    let size_bytes = file.data.len() as i64;
    state
        .storage
        .put(&file_key, file.data, &content_type)
        .await?;

    Ok(StoredFile {
        file_key,
        file_name: file.file_name.trim().to_string(),
        content_type,
        size_bytes,
    })
}

async fn find_document(state: &AppState, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
}

async fn revalidate_document(state: &AppState, document: &Document) {
    let tournament = tournament_slug(&state.pool, document.tournament_id).await;
    let club = club_slug(&state.pool, document.club_id).await;
    state
        .revalidate(Target::Document {
            tournament_slug: tournament.as_deref(),
            club_slug: club.as_deref(),
        })
        .await;
}
