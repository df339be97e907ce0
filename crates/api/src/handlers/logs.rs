//! Handlers for the remote API call log (PRD-02).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blueboost_db::models::api_log::{ApiLogCleanupQuery, ApiLogQuery};
use blueboost_db::repositories::ApiLogRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/logs
///
/// List call log entries, newest first. Supports `context_tag`, `limit`,
/// and `offset` query parameters.
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<ApiLogQuery>,
) -> AppResult<impl IntoResponse> {
    let logs = ApiLogRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/logs/count
pub async fn count_logs(
    State(state): State<AppState>,
    Query(params): Query<ApiLogQuery>,
) -> AppResult<impl IntoResponse> {
    let count = ApiLogRepo::count(&state.pool, &params).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}

/// DELETE /api/v1/logs
///
/// With `?older_than_days=N`, deletes entries older than N days;
/// without it, truncates the whole log.
pub async fn cleanup_logs(
    State(state): State<AppState>,
    Query(params): Query<ApiLogCleanupQuery>,
) -> AppResult<impl IntoResponse> {
    let deleted = match params.older_than_days {
        Some(days) => {
            let cutoff = chrono::Utc::now() - chrono::Duration::days(days.max(0));
            ApiLogRepo::delete_older_than(&state.pool, cutoff).await?
        }
        None => ApiLogRepo::delete_all(&state.pool).await?,
    };

    tracing::info!(deleted, "API call log cleanup");
    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": deleted }),
    }))
}
