//! Credit ledger entity models and DTOs (PRD-03).

use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `credit_history` ledger. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreditEntry {
    pub id: DbId,
    /// Service code the credits were spent on (faq, content, image).
    pub service: String,
    pub credits_used: i32,
    /// Balance reported by the remote API after the call, when known.
    pub credits_remaining: Option<i32>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub detail: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a ledger entry.
#[derive(Debug, Clone)]
pub struct CreateCreditEntry {
    pub service: String,
    pub credits_used: i32,
    pub credits_remaining: Option<i32>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub detail: Option<String>,
}

/// Query parameters for `GET /api/v1/credits`.
#[derive(Debug, Deserialize)]
pub struct CreditQuery {
    pub service: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
