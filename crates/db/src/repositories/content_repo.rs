//! Repository for the `product_contents` table (PRD-05).

use blueboost_core::localized::LocalizedText;
use blueboost_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::content::{CreateContent, ProductContent};
use crate::models::status::{ReviewStatus, StatusId};

/// Column list for `product_contents` queries.
const COLUMNS: &str = "\
    id, product_id, api_content_id, status_id, active, \
    generated_content, generated_summary, created_at, updated_at";

/// Provides CRUD operations for staged product descriptions.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a staged row (status pending, inactive).
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateContent,
    ) -> Result<ProductContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_contents \
                 (product_id, api_content_id, status_id, active, generated_content, generated_summary) \
             VALUES ($1, $2, $3, FALSE, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductContent>(&query)
            .bind(product_id)
            .bind(input.api_content_id)
            .bind(ReviewStatus::Pending.id())
            .bind(Json(&input.generated_content))
            .bind(input.generated_summary.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Find a staged content row by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_contents WHERE id = $1");
        sqlx::query_as::<_, ProductContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all staged content rows for a product, newest first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_contents \
             WHERE product_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ProductContent>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Set status and active flag in one write (accept path).
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
        active: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_contents \
             SET status_id = $2, active = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status_id)
        .bind(active)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Flip the active flag without touching the review status.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_contents SET active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite the localized generated text.
    pub async fn update_texts(
        pool: &PgPool,
        id: DbId,
        content: &LocalizedText,
        summary: Option<&LocalizedText>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_contents \
             SET generated_content = $2, generated_summary = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(Json(content))
        .bind(summary.map(Json))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a staged row (explicit delete and rejection).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
