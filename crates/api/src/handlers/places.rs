//! Public map endpoints: the GeoJSON layer and per-place detail documents.
//!
//! Both are read-only. Responses are bare JSON documents (no `data`
//! envelope); non-ASCII text is emitted literally.

use axum::extract::{Path, State};
use axum::Json;
use placemap_core::geojson::{Feature, FeatureCollection};
use placemap_core::place::{DetailCoordinates, PlaceDetail};
use placemap_core::types::DbId;
use placemap_db::repositories::PlaceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::RequestOrigin;
use crate::state::AppState;

/// GET /places.geojson
///
/// Every stored place as a point feature, in primary-key order.
pub async fn geojson(State(state): State<AppState>) -> AppResult<Json<FeatureCollection>> {
    let places = PlaceRepo::list(&state.pool).await?;

    let collection: FeatureCollection = places
        .into_iter()
        .map(|place| Feature::for_place(place.id, place.title, place.lng, place.lat))
        .collect();

    Ok(Json(collection))
}

/// GET /places/{id}/json/
///
/// Full detail for one place. Image URLs are absolute, resolved against the
/// origin of this request, and listed in display order, one per image row.
pub async fn detail(
    State(state): State<AppState>,
    origin: RequestOrigin,
    Path(id): Path<DbId>,
) -> AppResult<Json<PlaceDetail>> {
    let (place, images) = PlaceRepo::find_with_images(&state.pool, id)
        .await?
        .ok_or(AppError::PlaceNotFound)?;

    let imgs = images
        .iter()
        .map(|image| {
            let path = state.media.url(&image.image).ok_or_else(|| {
                AppError::InternalError(format!("Place image {} has no file", image.id))
            })?;
            origin.absolute_url(&path)
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(PlaceDetail {
        title: place.title,
        imgs,
        description_short: place.description_short,
        description_long: place.description_long,
        coordinates: DetailCoordinates::new(place.lng, place.lat),
    }))
}
