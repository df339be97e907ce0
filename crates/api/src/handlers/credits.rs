//! Handlers for the credit ledger and remote account info (PRD-03).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use blueboost_db::models::credit::CreditQuery;
use blueboost_db::repositories::CreditRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/credits
///
/// List local ledger entries, newest first. Supports `service`, `limit`,
/// and `offset` query parameters.
pub async fn list_credits(
    State(state): State<AppState>,
    Query(params): Query<CreditQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = CreditRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/credits/account
///
/// Proxy the remote account/credits lookup (30 s timeout class). The
/// gateway error taxonomy maps straight onto the response: missing key
/// is 503, remote trouble is 502.
pub async fn account_info(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let info = state.gateway.account_info().await?;
    Ok(Json(DataResponse { data: info }))
}
