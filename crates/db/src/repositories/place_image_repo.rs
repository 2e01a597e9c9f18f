//! Repository for the `place_images` table.
//!
//! Every listing is ordered by `position`, then `id`, so images with equal
//! positions still come back in a stable order.

use placemap_core::types::DbId;
use sqlx::PgPool;

use crate::models::place_image::{CreatePlaceImage, PlaceImage, UpdatePlaceImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, place_id, image, position, created_at, updated_at";

/// Provides CRUD and reorder operations for place images.
pub struct PlaceImageRepo;

impl PlaceImageRepo {
    /// Insert a new place image, returning the created row.
    ///
    /// If `position` is `None`, defaults to `0`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlaceImage,
    ) -> Result<PlaceImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO place_images (place_id, image, position) \
             VALUES ($1, $2, COALESCE($3, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(input.place_id)
            .bind(&input.image)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// Find a place image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlaceImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM place_images WHERE id = $1");
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the images of one place in display order.
    pub async fn list_by_place(
        pool: &PgPool,
        place_id: DbId,
    ) -> Result<Vec<PlaceImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM place_images \
             WHERE place_id = $1 \
             ORDER BY position, id"
        );
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(place_id)
            .fetch_all(pool)
            .await
    }

    /// List images across all places, optionally filtered to one place.
    ///
    /// Ordered by place, then display order.
    pub async fn list(
        pool: &PgPool,
        place_id: Option<DbId>,
    ) -> Result<Vec<PlaceImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM place_images \
             WHERE ($1::BIGINT IS NULL OR place_id = $1) \
             ORDER BY place_id, position, id"
        );
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(place_id)
            .fetch_all(pool)
            .await
    }

    /// Update a place image. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlaceImage,
    ) -> Result<Option<PlaceImage>, sqlx::Error> {
        let query = format!(
            "UPDATE place_images SET \
                place_id = COALESCE($2, place_id), \
                position = COALESCE($3, position) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(id)
            .bind(input.place_id)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    /// Delete a place image by ID, returning the removed row if there was one.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<PlaceImage>, sqlx::Error> {
        let query = format!("DELETE FROM place_images WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, PlaceImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a place for reordering and return its image ids in display order.
    ///
    /// The `places` row is locked `FOR UPDATE`, so images cannot be added to
    /// or moved into the place until `tx` ends; the image rows themselves are
    /// locked too. Returns `None` if the place does not exist.
    pub async fn lock_for_reorder(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        place_id: DbId,
    ) -> Result<Option<Vec<DbId>>, sqlx::Error> {
        let place: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM places WHERE id = $1 FOR UPDATE")
                .bind(place_id)
                .fetch_optional(&mut **tx)
                .await?;
        if place.is_none() {
            return Ok(None);
        }

        let ids = sqlx::query_scalar(
            "SELECT id FROM place_images WHERE place_id = $1 ORDER BY position, id FOR UPDATE",
        )
        .bind(place_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(Some(ids))
    }

    /// Apply `(image_id, position)` assignments within an existing
    /// transaction, returning the place's images in their new order.
    ///
    /// Assignments for images that do not belong to `place_id` are skipped.
    pub async fn apply_positions(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        place_id: DbId,
        positions: &[(DbId, i32)],
    ) -> Result<Vec<PlaceImage>, sqlx::Error> {
        for &(image_id, position) in positions {
            sqlx::query("UPDATE place_images SET position = $3 WHERE id = $1 AND place_id = $2")
                .bind(image_id)
                .bind(place_id)
                .bind(position)
                .execute(&mut **tx)
                .await?;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM place_images \
             WHERE place_id = $1 \
             ORDER BY position, id"
        );
        let images = sqlx::query_as::<_, PlaceImage>(&query)
            .bind(place_id)
            .fetch_all(&mut **tx)
            .await?;

        tracing::debug!(place_id, count = positions.len(), "Reordered place images");
        Ok(images)
    }
}
