//! Periodic cleanup of terminal generation jobs (PRD-04).
//!
//! Spawns a background task that deletes completed/failed job rows older
//! than the configured retention period. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use blueboost_db::repositories::JobRepo;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the job retention cleanup loop.
///
/// Deletes terminal job rows older than `retention_days`. Runs until
/// `cancel` is triggered. Jobs stuck in `processing` are never touched
/// here; they stay visible through the stale-job diagnostic listing.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Job retention task started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention task stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match JobRepo::delete_terminal_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Job retention: purged old rows");
                        } else {
                            tracing::debug!("Job retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Job retention: cleanup failed");
                    }
                }
            }
        }
    }
}
