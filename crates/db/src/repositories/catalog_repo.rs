//! Repositories for the live catalog tables (PRD-07).
//!
//! The catalog is the projection target of the review workflow. The core
//! contract is small on purpose: load an entity by id, write named fields
//! back, enumerate configured languages, and manage the live image store.

use blueboost_core::localized::LocalizedText;
use blueboost_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::catalog::{CatalogImage, Category, Language, Product};

/// Column list for `products` queries.
const PRODUCT_COLUMNS: &str = "\
    id, name, description_short, description_long, link_rewrite, \
    active, created_at, updated_at";

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str = "id, name, description, active, created_at, updated_at";

/// Column list for `catalog_images` queries.
const IMAGE_COLUMNS: &str = "id, product_id, position, cover, filename, created_at";

// ---------------------------------------------------------------------------
// ProductRepo
// ---------------------------------------------------------------------------

/// Read/write access to catalog products.
pub struct ProductRepo;

impl ProductRepo {
    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write accepted description fields onto a product.
    ///
    /// Returns `false` when the product does not exist; the caller treats
    /// that as a failed catalog write, not a silent success.
    pub async fn write_descriptions(
        pool: &PgPool,
        id: DbId,
        description_long: &LocalizedText,
        description_short: Option<&LocalizedText>,
    ) -> Result<bool, sqlx::Error> {
        let result = match description_short {
            Some(short) => {
                sqlx::query(
                    "UPDATE products \
                     SET description_long = $2, description_short = $3, updated_at = NOW() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(Json(description_long))
                .bind(Json(short))
                .execute(pool)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE products \
                     SET description_long = $2, updated_at = NOW() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(Json(description_long))
                .execute(pool)
                .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// CategoryRepo
// ---------------------------------------------------------------------------

/// Read access to catalog categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// LanguageRepo
// ---------------------------------------------------------------------------

/// Read access to configured languages.
pub struct LanguageRepo;

impl LanguageRepo {
    /// List active languages in id order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Language>, sqlx::Error> {
        sqlx::query_as::<_, Language>(
            "SELECT id, iso_code, name, active FROM languages WHERE active ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// CatalogImageRepo
// ---------------------------------------------------------------------------

/// Read/write access to the live image store.
pub struct CatalogImageRepo;

impl CatalogImageRepo {
    /// Create a live image row.
    ///
    /// Position is the product's current highest + 1; the image becomes
    /// the cover only when the product has none yet. Both are computed in
    /// the insert so concurrent accepts for one product stay consistent.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        filename: &str,
    ) -> Result<CatalogImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalog_images (product_id, position, cover, filename) \
             VALUES ($1, \
                 (SELECT COALESCE(MAX(position), 0) + 1 FROM catalog_images WHERE product_id = $1), \
                 NOT EXISTS (SELECT 1 FROM catalog_images WHERE product_id = $1 AND cover), \
                 $2) \
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, CatalogImage>(&query)
            .bind(product_id)
            .bind(filename)
            .fetch_one(pool)
            .await
    }

    /// Find a live image by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CatalogImage>, sqlx::Error> {
        let query = format!("SELECT {IMAGE_COLUMNS} FROM catalog_images WHERE id = $1");
        sqlx::query_as::<_, CatalogImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a live image row. Used both by the copy-failure rollback on
    /// accept and by deletion of an accepted staged image.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalog_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
