//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod place_image_repo;
pub mod place_repo;

pub use place_image_repo::PlaceImageRepo;
pub use place_repo::PlaceRepo;
