//! Shared response envelope types for admin handlers.
//!
//! Admin responses use a `{ "data": ... }` envelope. The public map
//! endpoints return their documents bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
