//! Background job dispatcher (PRD-04).
//!
//! Polls for pending jobs on a fixed interval and runs them through the
//! [`JobProcessor`]. Claiming uses an atomic conditional update (with
//! `FOR UPDATE SKIP LOCKED` on the queue scan), so multiple dispatcher
//! instances never double-process a job.

use std::sync::Arc;
use std::time::Duration;

use blueboost_db::repositories::JobRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::processor::JobProcessor;

/// Default polling interval for the dispatcher loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Label set when the dispatcher claims a job off the queue.
const LABEL_CLAIMED: &str = "Starting generation";

/// Long-lived loop matching pending jobs with the processor.
pub struct JobDispatcher {
    pool: PgPool,
    processor: Arc<JobProcessor>,
    poll_interval: Duration,
}

impl JobDispatcher {
    /// Create a dispatcher with the default 2-second poll interval.
    pub fn new(pool: PgPool, processor: Arc<JobProcessor>) -> Self {
        Self {
            pool,
            processor,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Run the dispatcher loop until the cancellation token is triggered.
    ///
    /// A job claimed before shutdown finishes its pass; cancellation is
    /// only observed between jobs.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Job dispatcher started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Job dispatcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.drain_queue(&cancel).await;
                }
            }
        }
    }

    /// Claim and process pending jobs until the queue is empty or
    /// shutdown is requested.
    async fn drain_queue(&self, cancel: &CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }

            let claimed = match JobRepo::claim_next(&self.pool, LABEL_CLAIMED).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to claim next job");
                    return;
                }
            };

            let Some(job) = claimed else {
                return;
            };

            let job_id = job.id;
            if let Err(e) = self.processor.run_claimed(job).await {
                // Infrastructure failure while driving the job; the row is
                // left in `processing` and will surface via the stale-job
                // listing for manual attention.
                tracing::error!(job_id, error = %e, "Job processing aborted");
            }
        }
    }
}
