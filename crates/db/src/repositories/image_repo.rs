//! Repository for the `product_images` staging table (PRD-06).

use blueboost_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{CreateProductImage, ProductImage};
use crate::models::status::ReviewStatus;

/// Column list for `product_images` queries.
const COLUMNS: &str = "\
    id, product_id, filename, status_id, prompt_id, \
    catalog_image_id, rejection_reason, created_at, updated_at";

/// Provides CRUD operations for staged product images.
pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Insert a staged row (status pending). The staged file must already
    /// exist on disk when this is called.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductImage,
    ) -> Result<ProductImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_images (product_id, filename, status_id, prompt_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(input.product_id)
            .bind(&input.filename)
            .bind(ReviewStatus::Pending.id())
            .bind(input.prompt_id)
            .fetch_one(pool)
            .await
    }

    /// Find a staged image by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_images WHERE id = $1");
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all staged images for a product, newest first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_images \
             WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Flip to accepted and record the live catalog image id.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        catalog_image_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_images \
             SET status_id = $2, catalog_image_id = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(ReviewStatus::Accepted.id())
        .bind(catalog_image_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Flip to rejected with the reviewer's reason.
    ///
    /// Unlike FAQ/content rows, rejected image rows are retained: once
    /// the staged file is gone the row is the only record of the
    /// artifact.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_images \
             SET status_id = $2, rejection_reason = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(ReviewStatus::Rejected.id())
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a staging row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
