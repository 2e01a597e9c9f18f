pub mod admin_images;
pub mod admin_places;
pub mod places;
