//! Public map routes, mounted at the server root.

use axum::routing::get;
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// ```text
/// GET /places.geojson          -> geojson
/// GET /places/{id}/json/       -> detail
/// GET /places/{id}/json        -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/places.geojson", get(places::geojson))
        .route("/places/{id}/json/", get(places::detail))
        .route("/places/{id}/json", get(places::detail))
}
