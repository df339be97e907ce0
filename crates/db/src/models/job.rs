//! Generation job entity models and DTOs (PRD-04).

use blueboost_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `generation_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenerationJob {
    pub id: DbId,
    pub job_type: String,
    pub status_id: StatusId,
    pub progress: i16,
    pub progress_label: Option<String>,
    pub product_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub request_data: serde_json::Value,
    pub response_data: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new job via `POST /api/v1/jobs`.
#[derive(Debug, Deserialize)]
pub struct CreateJob {
    pub job_type: String,
    /// Product scope, when the job targets a single product.
    pub product_id: Option<DbId>,
    /// Category scope, when the job targets a category.
    pub category_id: Option<DbId>,
    /// Opaque generation parameters, decoded by the processor.
    pub request_data: serde_json::Value,
}

/// Query parameters for `GET /api/v1/jobs`.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    /// Filter by status ID (e.g. 1 = pending, 4 = failed).
    pub status_id: Option<StatusId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Query parameters for `GET /api/v1/jobs/stale`.
#[derive(Debug, Deserialize)]
pub struct StaleJobQuery {
    /// Minutes a job may sit in `processing` before it counts as stale.
    /// Defaults to 30.
    pub minutes: Option<i64>,
}
