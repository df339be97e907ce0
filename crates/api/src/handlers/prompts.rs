//! Handlers for remote prompt listings (PRD-02).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Prompt listing kinds the remote API serves.
const VALID_PROMPT_KINDS: &[&str] = &["faq", "image", "content"];

/// GET /api/v1/prompts/{kind}
///
/// Pass the remote prompt listing through verbatim; the UI renders it
/// as-is.
pub async fn list_prompts(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !VALID_PROMPT_KINDS.contains(&kind.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown prompt kind '{kind}'. Must be one of: {}",
            VALID_PROMPT_KINDS.join(", ")
        )));
    }

    let listing = state.gateway.list_prompts(&kind).await?;
    Ok(Json(DataResponse { data: listing }))
}
