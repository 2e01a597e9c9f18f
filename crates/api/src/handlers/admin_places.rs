//! Handlers for the admin `/places` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placemap_core::error::CoreError;
use placemap_core::types::DbId;
use placemap_db::models::place::{CreatePlace, Place, UpdatePlace};
use placemap_db::repositories::PlaceRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::admin_images::{present_all, AdminPlaceImage};
use crate::query::PlaceSearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A place with its images in display order.
#[derive(Debug, Serialize)]
pub struct AdminPlace {
    #[serde(flatten)]
    pub place: Place,
    pub images: Vec<AdminPlaceImage>,
}

/// GET /api/v1/admin/places?search=
///
/// List places in primary-key order, optionally filtered by title.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PlaceSearchParams>,
) -> AppResult<impl IntoResponse> {
    let places = match params.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => PlaceRepo::search_by_title(&state.pool, term).await?,
        _ => PlaceRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: places }))
}

/// POST /api/v1/admin/places
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePlace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let place = PlaceRepo::create(&state.pool, &input).await?;

    tracing::info!(place_id = place.id, title = %place.title, "Place created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: place })))
}

/// GET /api/v1/admin/places/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (place, images) = PlaceRepo::find_with_images(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Place", id }))?;

    Ok(Json(DataResponse {
        data: AdminPlace {
            place,
            images: present_all(images, &state.media),
        },
    }))
}

/// PUT /api/v1/admin/places/{id}
///
/// Partial update; omitted fields keep their current values.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let place = PlaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Place", id }))?;

    tracing::info!(place_id = id, "Place updated");
    Ok(Json(DataResponse { data: place }))
}

/// DELETE /api/v1/admin/places/{id}
///
/// Deletes the place and, by cascade, its images; then removes their files.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let keys = PlaceRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Place", id }))?;

    state.media.delete_best_effort(&keys).await;

    tracing::info!(place_id = id, images = keys.len(), "Place deleted");
    Ok(StatusCode::NO_CONTENT)
}
