//! Repository for the `product_faqs` table (PRD-05).

use blueboost_core::localized::LocalizedText;
use blueboost_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::faq::{CreateFaq, ProductFaq};
use crate::models::status::{ReviewStatus, StatusId};

/// Column list for `product_faqs` queries.
const COLUMNS: &str = "\
    id, product_id, api_faq_id, status_id, active, \
    question, answer, position, created_at, updated_at";

/// Provides CRUD operations for staged product FAQs.
pub struct ProductFaqRepo;

impl ProductFaqRepo {
    /// Insert a staged row (status pending, inactive) at the next free
    /// position for the product.
    pub async fn create(
        pool: &PgPool,
        product_id: DbId,
        input: &CreateFaq,
    ) -> Result<ProductFaq, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_faqs \
                 (product_id, api_faq_id, status_id, active, question, answer, position) \
             VALUES ($1, $2, $3, FALSE, $4, $5, \
                 (SELECT COALESCE(MAX(position), 0) + 1 FROM product_faqs WHERE product_id = $1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductFaq>(&query)
            .bind(product_id)
            .bind(input.api_faq_id)
            .bind(ReviewStatus::Pending.id())
            .bind(Json(&input.question))
            .bind(Json(&input.answer))
            .fetch_one(pool)
            .await
    }

    /// Find a staged FAQ by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductFaq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_faqs WHERE id = $1");
        sqlx::query_as::<_, ProductFaq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all staged FAQs for a product, ordered by position.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductFaq>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_faqs \
             WHERE product_id = $1 \
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, ProductFaq>(&query)
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
            "UPDATE product_faqs \
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
            "UPDATE product_faqs SET active = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite the localized question/answer text.
    pub async fn update_texts(
        pool: &PgPool,
        id: DbId,
        question: &LocalizedText,
        answer: &LocalizedText,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_faqs \
             SET question = $2, answer = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(Json(question))
        .bind(Json(answer))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete a staged row. Rejection uses this too: rejected FAQ rows
    /// are removed, not retained.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
