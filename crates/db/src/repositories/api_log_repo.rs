//! Repository for the `api_call_logs` table (PRD-02).
//!
//! Insert and bulk-delete only; rows are immutable once written.

use blueboost_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::api_log::{ApiCallLog, ApiLogQuery, CreateApiCallLog};

/// Column list for `api_call_logs` queries.
const COLUMNS: &str = "\
    id, method, endpoint, request_headers, request_body, response_body, \
    http_code, duration_ms, error_message, context_tag, created_at";

/// Maximum page size for log listing.
const MAX_LIMIT: i64 = 500;

/// Default page size for log listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides insert and query operations for the remote API call log.
pub struct ApiLogRepo;

impl ApiLogRepo {
    /// Insert one call log entry.
    pub async fn insert(
        pool: &PgPool,
        entry: &CreateApiCallLog,
    ) -> Result<ApiCallLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_call_logs \
                 (method, endpoint, request_headers, request_body, response_body, \
                  http_code, duration_ms, error_message, context_tag) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiCallLog>(&query)
            .bind(&entry.method)
            .bind(&entry.endpoint)
            .bind(&entry.request_headers)
            .bind(&entry.request_body)
            .bind(&entry.response_body)
            .bind(entry.http_code)
            .bind(entry.duration_ms)
            .bind(&entry.error_message)
            .bind(&entry.context_tag)
            .fetch_one(pool)
            .await
    }

    /// Find a log entry by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ApiCallLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_call_logs WHERE id = $1");
        sqlx::query_as::<_, ApiCallLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List log entries, newest first, optionally filtered by context tag.
    pub async fn list(pool: &PgPool, params: &ApiLogQuery) -> Result<Vec<ApiCallLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        match &params.context_tag {
            Some(tag) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM api_call_logs \
                     WHERE context_tag = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, ApiCallLog>(&query)
                    .bind(tag)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM api_call_logs \
                     ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, ApiCallLog>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count log entries matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &ApiLogQuery) -> Result<i64, sqlx::Error> {
        match &params.context_tag {
            Some(tag) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*)::BIGINT FROM api_call_logs WHERE context_tag = $1",
                )
                .bind(tag)
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM api_call_logs")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Delete entries older than `cutoff`. Returns the rows removed.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM api_call_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Truncate the log. Returns the rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM api_call_logs").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
