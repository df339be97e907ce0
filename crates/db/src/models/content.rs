//! Staged description entity models and DTOs (PRD-05).

use blueboost_core::localized::LocalizedText;
use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `product_contents` table.
///
/// `generated_content` is the long description, `generated_summary` the
/// short one; acceptance writes both onto the product.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductContent {
    pub id: DbId,
    pub product_id: DbId,
    pub api_content_id: Option<DbId>,
    pub status_id: StatusId,
    pub active: bool,
    pub generated_content: Json<LocalizedText>,
    pub generated_summary: Option<Json<LocalizedText>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a staged content row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContent {
    pub api_content_id: Option<DbId>,
    pub generated_content: LocalizedText,
    pub generated_summary: Option<LocalizedText>,
}

/// DTO for editing a staged content row.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContent {
    pub generated_content: LocalizedText,
    pub generated_summary: Option<LocalizedText>,
    /// Mandatory when the row is API-linked and the text changed.
    pub modification_reason: Option<String>,
}
