pub mod admin;
pub mod health;
pub mod places;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/places                                    list (?search=), create
/// /admin/places/{id}                               get, update, delete
/// /admin/places/{id}/images                        upload (multipart POST)
/// /admin/places/{id}/images/order                  reorder (PUT)
///
/// /admin/place-images                              list (?place_id=)
/// /admin/place-images/{id}                         get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin", admin::router())
}
