//! Query parameter types for admin list endpoints.

use placemap_core::types::DbId;
use serde::Deserialize;

/// `?search=` on the place list: case-insensitive title substring.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceSearchParams {
    pub search: Option<String>,
}

/// `?place_id=` on the image list.
#[derive(Debug, Default, Deserialize)]
pub struct ImageFilterParams {
    pub place_id: Option<DbId>,
}
