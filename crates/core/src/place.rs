//! Place field rules and the place detail document.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Digits after the decimal point in detail-document coordinates.
pub const COORDINATE_DECIMALS: usize = 14;

/// Validate a place title: non-blank and at most [`TITLE_MAX_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {TITLE_MAX_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Reject non-finite coordinates. Out-of-range values are accepted.
pub fn validate_coordinate(name: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{name} must be a finite number")))
    }
}

/// Format a coordinate as a fixed-point decimal string with
/// [`COORDINATE_DECIMALS`] fractional digits, rounded from the exact binary value.
pub fn format_coordinate(value: f64) -> String {
    format!("{value:.prec$}", prec = COORDINATE_DECIMALS)
}

/// Detail document for one place, as consumed by the map popup.
///
/// Coordinates are fixed-point strings, not JSON numbers. `imgs` holds
/// absolute image URLs in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub title: String,
    pub imgs: Vec<String>,
    pub description_short: String,
    pub description_long: String,
    pub coordinates: DetailCoordinates,
}

/// Coordinates of a [`PlaceDetail`], formatted with [`format_coordinate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailCoordinates {
    pub lng: String,
    pub lat: String,
}

impl DetailCoordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng: format_coordinate(lng),
            lat: format_coordinate(lat),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn formats_fourteen_decimals() {
        assert_eq!(format_coordinate(37.5), "37.50000000000000");
        assert_eq!(format_coordinate(55.75), "55.75000000000000");
    }

    #[test]
    fn formats_negative_and_zero() {
        assert_eq!(format_coordinate(-0.5), "-0.50000000000000");
        assert_eq!(format_coordinate(0.0), "0.00000000000000");
    }

    #[test]
    fn rounds_from_binary_value() {
        // 0.1 is stored as 0.1000000000000000055511151231257827...
        assert_eq!(format_coordinate(0.1), "0.10000000000000");
        assert_eq!(format_coordinate(37.617633), "37.61763300000000");
        assert_eq!(format_coordinate(1.0 / 3.0), "0.33333333333333");
        assert_eq!(format_coordinate(2.0 / 3.0), "0.66666666666667");
    }

    #[test]
    fn detail_serializes_coordinates_as_strings() {
        let detail = PlaceDetail {
            title: "Москва".to_string(),
            imgs: vec![],
            description_short: String::new(),
            description_long: "<p>Hi</p>".to_string(),
            coordinates: DetailCoordinates::new(37.5, 55.75),
        };
        let text = serde_json::to_string(&detail).unwrap();
        assert_eq!(
            text,
            r#"{"title":"Москва","imgs":[],"description_short":"","description_long":"<p>Hi</p>","coordinates":{"lng":"37.50000000000000","lat":"55.75000000000000"}}"#
        );
    }

    #[test]
    fn title_rules() {
        assert!(validate_title("Red Square").is_ok());
        assert!(validate_title(&"я".repeat(TITLE_MAX_LEN)).is_ok());
        assert_matches!(validate_title(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_title(&"x".repeat(TITLE_MAX_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn coordinates_must_be_finite() {
        assert!(validate_coordinate("lng", 250.0).is_ok());
        assert_matches!(
            validate_coordinate("lat", f64::NAN),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_coordinate("lat", f64::INFINITY),
            Err(CoreError::Validation(_))
        );
    }
}
