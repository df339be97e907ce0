//! Handlers for the `/jobs` resource (PRD-04).
//!
//! Creating a job returns immediately with the pending row; the embedded
//! dispatcher picks it up. Clients poll `GET /jobs/{id}` (the UI polls on
//! a ~2 s interval) until they observe a terminal status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blueboost_core::catalog::normalize_entity_id;
use blueboost_core::error::CoreError;
use blueboost_core::jobs::validate_job_type;
use blueboost_core::types::DbId;
use blueboost_db::models::job::{CreateJob, JobListQuery, StaleJobQuery};
use blueboost_db::repositories::JobRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default staleness threshold for the diagnostic listing, in minutes.
const DEFAULT_STALE_MINUTES: i64 = 30;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Create a new generation job. Returns 201 with the pending row. The
/// stored `request_data` is decoded by the processor, so only its outer
/// shape is validated here.
pub async fn create_job(
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<impl IntoResponse> {
    validate_job_type(&input.job_type).map_err(AppError::Core)?;

    if !input.request_data.is_object() {
        return Err(AppError::BadRequest(
            "request_data must be a JSON object".into(),
        ));
    }

    // Callers send the scope either as explicit columns or embedded in
    // the generation parameters (as a bare id or an entity object); both
    // shapes normalize to the denormalized scope columns.
    let product_id = input.product_id.or_else(|| {
        input
            .request_data
            .get("product")
            .and_then(|v| normalize_entity_id(v, "id_product").ok())
    });
    let category_id = input.category_id.or_else(|| {
        input
            .request_data
            .get("category")
            .and_then(|v| normalize_entity_id(v, "id_category").ok())
    });

    let input = CreateJob {
        product_id,
        category_id,
        ..input
    };
    let job = JobRepo::create(&state.pool, &input).await?;

    tracing::info!(
        job_id = job.id,
        job_type = %job.job_type,
        product_id = job.product_id,
        category_id = job.category_id,
        "Job created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

// ---------------------------------------------------------------------------
// List / poll
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List jobs, newest first. Supports optional `status_id`, `limit`, and
/// `offset` query parameters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id}
///
/// Poll a job's status and progress.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        }))?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// Stale diagnostics
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/stale
///
/// List jobs stuck in `processing` longer than `?minutes` (default 30).
/// Diagnostic only: nothing is requeued or failed automatically; an
/// operator decides what to do with a stuck job.
pub async fn list_stale_jobs(
    State(state): State<AppState>,
    Query(params): Query<StaleJobQuery>,
) -> AppResult<impl IntoResponse> {
    let minutes = params.minutes.unwrap_or(DEFAULT_STALE_MINUTES).max(1);
    let cutoff = chrono::Utc::now() - chrono::Duration::minutes(minutes);

    let jobs = JobRepo::list_stale_processing(&state.pool, cutoff).await?;
    Ok(Json(DataResponse { data: jobs }))
}
