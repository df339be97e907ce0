//! Staged product image entity models and DTOs (PRD-06).

use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `product_images` table.
///
/// The artifact itself is a file in the staging directory; `filename` is
/// relative to it. `catalog_image_id` is set only once the image has been
/// accepted into the live catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub filename: String,
    pub status_id: StatusId,
    pub prompt_id: Option<DbId>,
    pub catalog_image_id: Option<DbId>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a staged image row (job processor only).
#[derive(Debug, Clone)]
pub struct CreateProductImage {
    pub product_id: DbId,
    pub filename: String,
    pub prompt_id: Option<DbId>,
}

/// Body of `POST /images/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectImageRequest {
    pub reason: Option<String>,
}
