//! Handlers for place images in the admin API.
//!
//! Images are uploaded under a place (`/places/{id}/images`) and then managed
//! individually at `/place-images/{id}`. Each representation carries a
//! preview snippet for the editing UI.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placemap_core::error::CoreError;
use placemap_core::media::{image_extension, new_image_key, preview_html};
use placemap_core::ordering::{plan_reorder, validate_position};
use placemap_core::types::DbId;
use placemap_db::models::place_image::{CreatePlaceImage, PlaceImage, UpdatePlaceImage};
use placemap_db::repositories::{PlaceImageRepo, PlaceRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::media::MediaStorage;
use crate::query::ImageFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Representations
// ---------------------------------------------------------------------------

/// A place image as shown in the admin UI.
#[derive(Debug, Serialize)]
pub struct AdminPlaceImage {
    #[serde(flatten)]
    pub image: PlaceImage,
    /// Relative media URL, `None` when no file is attached.
    pub url: Option<String>,
    /// Inline `<img>` preview or a placeholder.
    pub preview: String,
}

impl AdminPlaceImage {
    pub fn new(image: PlaceImage, media: &MediaStorage) -> Self {
        let url = media.url(&image.image);
        let preview = preview_html(url.as_deref());
        Self {
            image,
            url,
            preview,
        }
    }
}

pub(crate) fn present_all(images: Vec<PlaceImage>, media: &MediaStorage) -> Vec<AdminPlaceImage> {
    images
        .into_iter()
        .map(|image| AdminPlaceImage::new(image, media))
        .collect()
}

/// Body of a drag-and-drop reorder: image ids in their new display order.
#[derive(Debug, Deserialize)]
pub struct ReorderImages {
    pub image_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/place-images?place_id=
///
/// List images, optionally restricted to one place.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ImageFilterParams>,
) -> AppResult<impl IntoResponse> {
    let images = PlaceImageRepo::list(&state.pool, params.place_id).await?;
    Ok(Json(DataResponse {
        data: present_all(images, &state.media),
    }))
}

/// GET /api/v1/admin/place-images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = find_image(&state, id).await?;
    Ok(Json(DataResponse {
        data: AdminPlaceImage::new(image, &state.media),
    }))
}

/// POST /api/v1/admin/places/{id}/images
///
/// Accepts a multipart form with a required `image` file field and an
/// optional `position` field (default 0). The file is written to the blob
/// store under `places/` before the row is inserted.
pub async fn upload(
    State(state): State<AppState>,
    Path(place_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    ensure_place_exists(&state, place_id).await?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut position: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            "position" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    let value: i32 = trimmed.parse().map_err(|_| {
                        AppError::BadRequest(format!("Invalid position '{trimmed}'"))
                    })?;
                    validate_position(value)?;
                    position = Some(value);
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded image is empty".into()));
    }

    let ext = image_extension(&filename)?;
    let key = new_image_key(&ext);
    state.media.save(&key, &data).await?;

    let input = CreatePlaceImage {
        place_id,
        image: key.clone(),
        position,
    };
    let image = match PlaceImageRepo::create(&state.pool, &input).await {
        Ok(image) => image,
        Err(err) => {
            state.media.delete_best_effort([key.as_str()]).await;
            return Err(err.into());
        }
    };

    tracing::info!(
        place_id,
        image_id = image.id,
        key = %image.image,
        bytes = data.len(),
        "Place image uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AdminPlaceImage::new(image, &state.media),
        }),
    ))
}

/// PUT /api/v1/admin/place-images/{id}
///
/// Change an image's position or move it to another place.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlaceImage>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(place_id) = input.place_id {
        ensure_place_exists(&state, place_id).await?;
    }

    let image = PlaceImageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlaceImage",
            id,
        }))?;

    tracing::info!(image_id = id, position = image.position, "Place image updated");
    Ok(Json(DataResponse {
        data: AdminPlaceImage::new(image, &state.media),
    }))
}

/// DELETE /api/v1/admin/place-images/{id}
///
/// Removes the row, then the stored file.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image = PlaceImageRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlaceImage",
            id,
        }))?;

    state.media.delete_best_effort([image.image.as_str()]).await;

    tracing::info!(image_id = id, place_id = image.place_id, "Place image deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/places/{id}/images/order
///
/// Drag-and-drop reorder. `image_ids` must list every image of the place
/// exactly once; positions are rewritten to `0..n` in that order. The check
/// and the rewrite run in one transaction with the place locked, so an
/// upload cannot slip in between.
pub async fn reorder(
    State(state): State<AppState>,
    Path(place_id): Path<DbId>,
    Json(input): Json<ReorderImages>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;

    let current = PlaceImageRepo::lock_for_reorder(&mut tx, place_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id: place_id,
        }))?;
    let plan = plan_reorder(&current, &input.image_ids)?;

    let images = PlaceImageRepo::apply_positions(&mut tx, place_id, &plan).await?;
    tx.commit().await?;

    tracing::info!(place_id, count = images.len(), "Place images reordered");
    Ok(Json(DataResponse {
        data: present_all(images, &state.media),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_image(state: &AppState, id: DbId) -> AppResult<PlaceImage> {
    PlaceImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlaceImage",
            id,
        }))
}

async fn ensure_place_exists(state: &AppState, place_id: DbId) -> AppResult<()> {
    PlaceRepo::find_by_id(&state.pool, place_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id: place_id,
        }))
}
