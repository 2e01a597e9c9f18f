//! Place image entity model and DTOs.

use placemap_core::error::CoreError;
use placemap_core::ordering::validate_position;
use placemap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `place_images` table.
///
/// `image` is the blob-store key of the file (e.g. `places/<uuid>.jpg`), or an
/// empty string when no file is attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaceImage {
    pub id: DbId,
    pub place_id: DbId,
    pub image: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new place image. `position` defaults to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaceImage {
    pub place_id: DbId,
    pub image: String,
    pub position: Option<i32>,
}

/// DTO for updating a place image. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaceImage {
    /// Move the image to another place.
    pub place_id: Option<DbId>,
    pub position: Option<i32>,
}

impl CreatePlaceImage {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.position.map_or(Ok(()), validate_position)
    }
}

impl UpdatePlaceImage {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.position.map_or(Ok(()), validate_position)
    }
}
