//! GeoJSON document types for the map layer.
//!
//! Only the subset the map front-end consumes is modelled: a
//! `FeatureCollection` of `Point` features carrying place properties.
//! The `type` member is produced by serde's internal tagging, so the
//! serialized shape is `{"type": "FeatureCollection", "features": [...]}`.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// A single GeoJSON `Feature` describing one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: PlaceProperties,
}

/// Geometry of a feature. Places are always points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`, GeoJSON axis order.
    Point { coordinates: [f64; 2] },
}

/// Properties attached to every place feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceProperties {
    pub title: String,
    /// Front-end element id, `place_<id>`.
    pub place_id: String,
    /// Relative path of the place detail document.
    pub details_url: String,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl Feature {
    /// Build the feature for one place.
    pub fn for_place(id: DbId, title: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            geometry: Geometry::Point {
                coordinates: [lng, lat],
            },
            properties: PlaceProperties {
                title: title.into(),
                place_id: place_element_id(id),
                details_url: place_details_path(id),
            },
        }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

/// Element id used by the map front-end for a place.
pub fn place_element_id(id: DbId) -> String {
    format!("place_{id}")
}

/// Relative path of the detail endpoint for a place.
pub fn place_details_path(id: DbId) -> String {
    format!("/places/{id}/json/")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
