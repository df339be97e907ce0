//! Repository for the `generation_jobs` table (PRD-04).
//!
//! Uses `JobStatus` from `models::status` for all status transitions.
//! The pending -> processing transition is an atomic conditional update:
//! claiming is the only concurrency guard the job subsystem needs, so it
//! must not be a check-then-act read.

use blueboost_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::job::{CreateJob, GenerationJob, JobListQuery};
use crate::models::status::JobStatus;

/// Column list for `generation_jobs` queries.
const COLUMNS: &str = "\
    id, job_type, status_id, progress, progress_label, \
    product_id, category_id, request_data, response_data, error_message, \
    created_at, updated_at";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for generation jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job with progress 0.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<GenerationJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_jobs \
                 (job_type, status_id, product_id, category_id, request_data) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(&input.job_type)
            .bind(JobStatus::Pending.id())
            .bind(input.product_id)
            .bind(input.category_id)
            .bind(&input.request_data)
            .fetch_one(pool)
            .await
    }

    /// Atomically claim a specific pending job for processing.
    ///
    /// Returns `None` when the job is not pending (already claimed,
    /// terminal, or missing) -- the caller must treat that as a no-op,
    /// never as an error. Two concurrent claims for the same id cannot
    /// both succeed.
    pub async fn claim_pending(
        pool: &PgPool,
        job_id: DbId,
        label: &str,
    ) -> Result<Option<GenerationJob>, sqlx::Error> {
        let query = format!(
            "UPDATE generation_jobs \
             SET status_id = $2, progress_label = $3, updated_at = NOW() \
             WHERE id = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(job_id)
            .bind(JobStatus::Processing.id())
            .bind(label)
            .bind(JobStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest pending job, if any.
    ///
    /// `FOR UPDATE SKIP LOCKED` keeps concurrent dispatcher instances from
    /// double-claiming.
    pub async fn claim_next(
        pool: &PgPool,
        label: &str,
    ) -> Result<Option<GenerationJob>, sqlx::Error> {
        let query = format!(
            "UPDATE generation_jobs \
             SET status_id = $1, progress_label = $2, updated_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM generation_jobs \
                 WHERE status_id = $3 \
                 ORDER BY created_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(JobStatus::Processing.id())
            .bind(label)
            .bind(JobStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Update progress percentage and label.
    ///
    /// The caller clamps the percentage; this only writes it.
    pub async fn update_progress(
        pool: &PgPool,
        job_id: DbId,
        percent: i16,
        label: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_jobs \
             SET progress = $2, progress_label = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(percent)
        .bind(label)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as completed with its response payload.
    ///
    /// Forces `progress` to 100: a job only ever shows 100 when it is
    /// completed.
    pub async fn complete(
        pool: &PgPool,
        job_id: DbId,
        response_data: &serde_json::Value,
        label: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $2, response_data = $3, progress = 100, \
                 progress_label = $4, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Completed.id())
        .bind(response_data)
        .bind(label)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as failed with an error message.
    ///
    /// Progress is left where it was -- a failed job freezes its last
    /// reported progress. No automatic retry exists; re-running a failed
    /// generation is a human creating a new job.
    pub async fn fail(pool: &PgPool, job_id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE generation_jobs \
             SET status_id = $2, error_message = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a job by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GenerationJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generation_jobs WHERE id = $1");
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs with optional status filter and pagination.
    pub async fn list(
        pool: &PgPool,
        params: &JobListQuery,
    ) -> Result<Vec<GenerationJob>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        match params.status_id {
            Some(status_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM generation_jobs \
                     WHERE status_id = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, GenerationJob>(&query)
                    .bind(status_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM generation_jobs \
                     ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, GenerationJob>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Delete terminal jobs (completed or failed) older than `cutoff`.
    ///
    /// Returns the number of rows removed. Used by the retention sweep.
    pub async fn delete_terminal_older_than(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM generation_jobs \
             WHERE status_id IN ($1, $2) AND updated_at < $3",
        )
        .bind(JobStatus::Completed.id())
        .bind(JobStatus::Failed.id())
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List jobs stuck in `processing` since before `cutoff`.
    ///
    /// Diagnostic only: stale jobs are surfaced for manual attention, not
    /// requeued or failed automatically.
    pub async fn list_stale_processing(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<GenerationJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generation_jobs \
             WHERE status_id = $1 AND updated_at < $2 \
             ORDER BY updated_at ASC"
        );
        sqlx::query_as::<_, GenerationJob>(&query)
            .bind(JobStatus::Processing.id())
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }
}
