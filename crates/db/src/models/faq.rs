//! Staged FAQ entity models and DTOs (PRD-05).
//!
//! Product and category FAQs share one shape apart from the owning
//! foreign key; they live in separate tables and separate repositories,
//! so each model carries its own struct.

use blueboost_core::localized::LocalizedText;
use blueboost_core::review::IdList;
use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `product_faqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductFaq {
    pub id: DbId,
    pub product_id: DbId,
    /// Remote-system identifier, present only for API-generated rows.
    pub api_faq_id: Option<DbId>,
    pub status_id: StatusId,
    pub active: bool,
    pub question: Json<LocalizedText>,
    pub answer: Json<LocalizedText>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `category_faqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryFaq {
    pub id: DbId,
    pub category_id: DbId,
    pub api_faq_id: Option<DbId>,
    pub status_id: StatusId,
    pub active: bool,
    pub question: Json<LocalizedText>,
    pub answer: Json<LocalizedText>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a staged FAQ row.
///
/// Used by both the manual-add endpoint (no `api_faq_id`) and the job
/// processor (carries the remote id from the generation response).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaq {
    pub api_faq_id: Option<DbId>,
    pub question: LocalizedText,
    pub answer: LocalizedText,
}

/// DTO for editing a staged FAQ row's text.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFaq {
    pub question: LocalizedText,
    pub answer: LocalizedText,
    /// Mandatory when the row is API-linked and the text changed.
    pub modification_reason: Option<String>,
}

/// Body of the bulk accept/reject endpoints.
#[derive(Debug, Deserialize)]
pub struct BulkFaqRequest {
    pub ids: IdList,
}
