//! Route definitions for the `/jobs` resource (PRD-04).

use axum::routing::get;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /          -> list_jobs
/// POST   /          -> create_job
/// GET    /stale     -> list_stale_jobs
/// GET    /{id}      -> get_job (status polling)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs).post(jobs::create_job))
        .route("/stale", get(jobs::list_stale_jobs))
        .route("/{id}", get(jobs::get_job))
}
