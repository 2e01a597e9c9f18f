//! Place entity model and DTOs.
//!
//! A place is a point of interest on the map. It owns an ordered set of
//! images (see [`super::place_image`]); deleting a place cascades to them.

use placemap_core::error::CoreError;
use placemap_core::place::{validate_coordinate, validate_title};
use placemap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub title: String,
    pub description_short: String,
    /// May contain HTML markup; stored and returned verbatim.
    pub description_long: String,
    pub lng: f64,
    pub lat: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new place. Descriptions default to empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlace {
    pub title: String,
    pub description_short: Option<String>,
    pub description_long: Option<String>,
    pub lng: f64,
    pub lat: f64,
}

/// DTO for updating an existing place. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlace {
    pub title: Option<String>,
    pub description_short: Option<String>,
    pub description_long: Option<String>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
}

impl CreatePlace {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_coordinate("lng", self.lng)?;
        validate_coordinate("lat", self.lat)
    }
}

impl UpdatePlace {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(lng) = self.lng {
            validate_coordinate("lng", lng)?;
        }
        if let Some(lat) = self.lat {
            validate_coordinate("lat", lat)?;
        }
        Ok(())
    }
}
