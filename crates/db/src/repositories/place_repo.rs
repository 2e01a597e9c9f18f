//! Repository for the `places` table.

use placemap_core::types::DbId;
use sqlx::PgPool;

use crate::models::place::{CreatePlace, Place, UpdatePlace};
use crate::models::place_image::PlaceImage;
use crate::repositories::PlaceImageRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description_short, description_long, lng, lat, created_at, updated_at";

/// Provides CRUD operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a new place, returning the created row.
    ///
    /// Missing descriptions are stored as empty strings.
    pub async fn create(pool: &PgPool, input: &CreatePlace) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO places (title, description_short, description_long, lng, lat) \
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(&input.title)
            .bind(&input.description_short)
            .bind(&input.description_long)
            .bind(input.lng)
            .bind(input.lat)
            .fetch_one(pool)
            .await
    }

    /// Find a place by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a place together with its images in display order.
    ///
    /// Issues one query for the place and, if it exists, one for its images.
    pub async fn find_with_images(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Place, Vec<PlaceImage>)>, sqlx::Error> {
        let Some(place) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let images = PlaceImageRepo::list_by_place(pool, id).await?;
        Ok(Some((place, images)))
    }

    /// List all places in primary-key order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places ORDER BY id");
        sqlx::query_as::<_, Place>(&query).fetch_all(pool).await
    }

    /// List places whose title contains `term` (case-insensitive), in
    /// primary-key order. `LIKE` wildcards in `term` match literally.
    pub async fn search_by_title(pool: &PgPool, term: &str) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM places \
             WHERE title ILIKE $1 ESCAPE '\\' \
             ORDER BY id"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(format!("%{}%", escape_like(term)))
            .fetch_all(pool)
            .await
    }

    /// Update a place. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET \
                title = COALESCE($2, title), \
                description_short = COALESCE($3, description_short), \
                description_long = COALESCE($4, description_long), \
                lng = COALESCE($5, lng), \
                lat = COALESCE($6, lat) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description_short)
            .bind(&input.description_long)
            .bind(input.lng)
            .bind(input.lat)
            .fetch_optional(pool)
            .await
    }

    /// Delete a place. Its images are removed by `ON DELETE CASCADE`.
    ///
    /// Returns the blob keys of the removed images so the caller can clean up
    /// the files, or `None` if no place with the given `id` existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let keys: Vec<String> = sqlx::query_scalar(
            "SELECT image FROM place_images WHERE place_id = $1 AND image <> '' FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() > 0 {
            Ok(Some(keys))
        } else {
            Ok(None)
        }
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
