//! Domain logic for the place map service.
//!
//! Everything here is pure: no database handles, no HTTP types. The `db` and
//! `api` crates build on these types and helpers.

pub mod error;
pub mod geojson;
pub mod media;
pub mod ordering;
pub mod place;
pub mod types;
