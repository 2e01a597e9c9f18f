//! Admin editing routes, mounted at `/api/v1/admin`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_images, admin_places};
use crate::state::AppState;

/// ```text
/// GET, POST          /places
/// GET, PUT, DELETE   /places/{id}
/// POST               /places/{id}/images
/// PUT                /places/{id}/images/order
/// GET                /place-images
/// GET, PUT, DELETE   /place-images/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/places", get(admin_places::list).post(admin_places::create))
        .route(
            "/places/{id}",
            get(admin_places::get_by_id)
                .put(admin_places::update)
                .delete(admin_places::delete),
        )
        .route("/places/{id}/images", post(admin_images::upload))
        .route("/places/{id}/images/order", put(admin_images::reorder))
        .route("/place-images", get(admin_images::list))
        .route(
            "/place-images/{id}",
            get(admin_images::get_by_id)
                .put(admin_images::update)
                .delete(admin_images::delete),
        )
}
