//! Image ordering rules.
//!
//! Images of a place are enumerated by ascending `position`, ties broken by
//! ascending id. Positions need not be unique or contiguous; a drag-and-drop
//! reorder rewrites them densely as `0..n`.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Validate a position value supplied by a client.
pub fn validate_position(position: i32) -> Result<(), CoreError> {
    if position < 0 {
        Err(CoreError::Validation(format!(
            "Position must be non-negative, got {position}"
        )))
    } else {
        Ok(())
    }
}

/// Plan the position rewrite for a reorder request.
///
/// `current` holds the ids of the images the place has now; `requested` is the
/// new order. `requested` must be a permutation of `current`. Returns
/// `(image_id, new_position)` pairs in the requested order.
pub fn plan_reorder(current: &[DbId], requested: &[DbId]) -> Result<Vec<(DbId, i32)>, CoreError> {
    let mut seen = HashSet::with_capacity(requested.len());
    if let Some(dup) = requested.iter().find(|id| !seen.insert(**id)) {
        return Err(CoreError::Validation(format!(
            "Image {dup} appears more than once in the new order"
        )));
    }

    let existing: HashSet<DbId> = current.iter().copied().collect();
    if let Some(foreign) = requested.iter().find(|id| !existing.contains(*id)) {
        return Err(CoreError::Validation(format!(
            "Image {foreign} does not belong to this place"
        )));
    }
    if let Some(missing) = current.iter().find(|id| !seen.contains(*id)) {
        return Err(CoreError::Validation(format!(
            "Image {missing} is missing from the new order"
        )));
    }

    requested
        .iter()
        .enumerate()
        .map(|(index, id)| {
            i32::try_from(index)
                .map(|position| (*id, position))
                .map_err(|_| CoreError::Validation("Too many images to reorder".into()))
        })
        .collect()
}
