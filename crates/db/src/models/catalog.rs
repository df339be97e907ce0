//! Live catalog entity models (PRD-07).
//!
//! These tables are the projection target for accepted content: the
//! review workflow writes into them, generation reads from them. Text
//! fields are language-keyed JSONB maps.

use blueboost_core::localized::LocalizedText;
use blueboost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: Json<LocalizedText>,
    pub description_short: Json<LocalizedText>,
    pub description_long: Json<LocalizedText>,
    pub link_rewrite: Json<LocalizedText>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: Json<LocalizedText>,
    pub description: Json<LocalizedText>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `catalog_images` table (the live image store).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogImage {
    pub id: DbId,
    pub product_id: DbId,
    pub position: i32,
    pub cover: bool,
    pub filename: String,
    pub created_at: Timestamp,
}

/// A row from the `languages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Language {
    pub id: DbId,
    pub iso_code: String,
    pub name: String,
    pub active: bool,
}
