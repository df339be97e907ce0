//! Remote API call log entity models and DTOs (PRD-02).
//!
//! Append-only audit of every outbound gateway call. Rows are never
//! updated; cleanup is bulk deletion by age or full truncation.

use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single call log entry. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiCallLog {
    pub id: DbId,
    pub method: String,
    pub endpoint: String,
    /// Request headers with credential values masked before persisting.
    pub request_headers: serde_json::Value,
    pub request_body: Option<serde_json::Value>,
    pub response_body: Option<String>,
    pub http_code: i32,
    pub duration_ms: i64,
    pub error_message: Option<String>,
    pub context_tag: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a call log entry.
#[derive(Debug, Clone)]
pub struct CreateApiCallLog {
    pub method: String,
    pub endpoint: String,
    pub request_headers: serde_json::Value,
    pub request_body: Option<serde_json::Value>,
    pub response_body: Option<String>,
    pub http_code: i32,
    pub duration_ms: i64,
    pub error_message: Option<String>,
    pub context_tag: Option<String>,
}

/// Filter parameters for `GET /api/v1/logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiLogQuery {
    pub context_tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `DELETE /api/v1/logs`.
#[derive(Debug, Deserialize)]
pub struct ApiLogCleanupQuery {
    /// Delete entries older than this many days; absent means delete all.
    pub older_than_days: Option<i64>,
}
