//! Handlers for `/admin/photos`.
//!
//! Same storage lifecycle as documents. Width and height are read from the
//! image header at upload, so a file that is not a decodable image is
//! rejected before anything is stored.

use std::io::Cursor;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clubhouse_core::assets::{
    essence, storage_key, validate_photo_category, validate_title, validate_upload,
    MAX_PHOTO_BYTES, PHOTO_CONTENT_TYPES, PHOTO_KEY_PREFIX,
};
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::Target;
use clubhouse_core::types::DbId;
use clubhouse_db::models::photo::{
    CreatePhoto, Photo, PhotoListParams, ReplacePhotoFile, UpdatePhoto,
};
use clubhouse_db::repositories::PhotoRepo;

use super::associations::{club_slug, instance_tournament_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{delete_object_best_effort, UploadForm, UploadedFile};

/// GET /api/v1/admin/photos?category=&tournament_instance_id=&club_id=&limit=&offset=
pub async fn list_photos(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Query(params): Query<PhotoListParams>,
) -> AppResult<Json<DataResponse<Vec<Photo>>>> {
    if let Some(category) = &params.category {
        validate_photo_category(category)?;
    }
    let photos = PhotoRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// GET /api/v1/admin/photos/{id}
pub async fn get_photo(
    State(state): State<AppState>,
    RequireEditor(_user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Photo>>> {
    let photo = find_photo(&state, id).await?;
    Ok(Json(DataResponse { data: photo }))
}

/// POST /api/v1/admin/photos
///
/// Multipart form: `file`, `title`, `category`, optional `description`,
/// `tournament_instance_id`, `club_id` and `sort_order`.
pub async fn upload_photo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Photo>>)> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;

    let title = form.require_text("title")?.to_string();
    validate_title(&title)?;
    let category = form.require_text("category")?.to_string();
    validate_photo_category(&category)?;

    let input_description = form.text("description").map(str::to_string);
    let tournament_instance_id = form.optional_id("tournament_instance_id")?;
    let club_id = form.optional_id("club_id")?;
    let sort_order = form.optional_i32("sort_order")?.unwrap_or(0);

    let stored = store_image(&state, file).await?;

    let input = CreatePhoto {
        title,
        description: input_description,
        category,
        file_key: stored.file_key.clone(),
        content_type: stored.content_type,
        size_bytes: stored.size_bytes,
        width: stored.width,
        height: stored.height,
        tournament_instance_id,
        club_id,
        sort_order,
        uploaded_by: user.user_id,
    };

    let photo = match PhotoRepo::create(&state.pool, &input).await {
        Ok(photo) => photo,
        Err(e) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        photo_id = photo.id,
        file_key = %photo.file_key,
        width = photo.width,
        height = photo.height,
        user_id = user.user_id,
        "Photo uploaded"
    );

    revalidate_photo(&state, &photo).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// PUT /api/v1/admin/photos/{id}
pub async fn update_photo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<DataResponse<Photo>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(category) = &input.category {
        validate_photo_category(category)?;
    }

    let previous = find_photo(&state, id).await?;
    let photo = PhotoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    tracing::info!(photo_id = id, user_id = user.user_id, "Photo updated");

    if (previous.tournament_instance_id, previous.club_id)
        != (photo.tournament_instance_id, photo.club_id)
    {
        revalidate_photo(&state, &previous).await;
    }
    revalidate_photo(&state, &photo).await;
    Ok(Json(DataResponse { data: photo }))
}

/// PUT /api/v1/admin/photos/{id}/file
pub async fn replace_photo_file(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Photo>>> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.take_file()?;

    let previous = find_photo(&state, id).await?;
    let stored = store_image(&state, file).await?;

    let input = ReplacePhotoFile {
        file_key: stored.file_key.clone(),
        content_type: stored.content_type,
        size_bytes: stored.size_bytes,
        width: stored.width,
        height: stored.height,
    };

    let photo = match PhotoRepo::replace_file(&state.pool, id, &input).await {
        Ok(Some(photo)) => photo,
        Ok(None) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(AppError::Core(CoreError::NotFound { entity: "Photo", id }));
        }
        Err(e) => {
            delete_object_best_effort(state.storage.as_ref(), &stored.file_key).await;
            return Err(e.into());
        }
    };
    delete_object_best_effort(state.storage.as_ref(), &previous.file_key).await;
    tracing::info!(photo_id = id, new_key = %photo.file_key, user_id = user.user_id, "Photo file replaced");

    revalidate_photo(&state, &photo).await;
    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/admin/photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let photo = PhotoRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))?;
    delete_object_best_effort(state.storage.as_ref(), &photo.file_key).await;
    tracing::info!(photo_id = id, user_id = user.user_id, "Photo deleted");

    revalidate_photo(&state, &photo).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct StoredImage {
    file_key: String,
    content_type: String,
    size_bytes: i64,
    width: i32,
    height: i32,
}

/// Validate an uploaded image, read its header and store it.
///
/// The stored content type is the one detected from the bytes, not the one
/// the client declared.
async fn store_image(state: &AppState, file: UploadedFile) -> AppResult<StoredImage> {
    let declared = essence(&file.content_type);
    validate_upload(&declared, file.data.len(), PHOTO_CONTENT_TYPES, MAX_PHOTO_BYTES)?;
    let header = read_image_header(&file.data)?;
    validate_upload(header.content_type, file.data.len(), PHOTO_CONTENT_TYPES, MAX_PHOTO_BYTES)?;
    if header.content_type != declared {
        tracing::debug!(declared = %declared, detected = header.content_type, "Photo content type corrected");
    }

    let file_key = storage_key(PHOTO_KEY_PREFIX, &file.file_name);
    let size_bytes = file.data.len() as i64;
    state
        .storage
        .put(&file_key, file.data, header.content_type)
        .await?;

    Ok(StoredImage {
        file_key,
        content_type: header.content_type.to_string(),
        size_bytes,
        width: header.width,
        height: header.height,
    })
}

#[derive(Debug, PartialEq, Eq)]
struct ImageHeader {
    content_type: &'static str,
    width: i32,
    height: i32,
}

/// Format and dimensions from the image header, without decoding pixel data.
fn read_image_header(data: &[u8]) -> Result<ImageHeader, CoreError> {
    let unreadable = || CoreError::Validation("Could not read image dimensions".into());

    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| unreadable())?;
    let format = reader.format().ok_or_else(unreadable)?;
    let (width, height) = reader.into_dimensions().map_err(|_| unreadable())?;

    Ok(ImageHeader {
        content_type: format.to_mime_type(),
        width: i32::try_from(width).map_err(|_| unreadable())?,
        height: i32::try_from(height).map_err(|_| unreadable())?,
    })
}

async fn find_photo(state: &AppState, id: DbId) -> AppResult<Photo> {
    PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Photo", id }))
}

async fn revalidate_photo(state: &AppState, photo: &Photo) {
    let tournament = instance_tournament_slug(&state.pool, photo.tournament_instance_id).await;
    let club = club_slug(&state.pool, photo.club_id).await;
    state
        .revalidate(Target::Photo {
            tournament_slug: tournament.as_deref(),
            club_slug: club.as_deref(),
        })
        .await;
}
