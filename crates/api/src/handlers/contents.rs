//! Handlers for staged product descriptions (PRD-05/PRD-07).
//!
//! Acceptance does double duty: it flips the staged row AND writes the
//! generated description into the product's description fields in the
//! same operation. Remote sync and catalog write both gate the accept;
//! toggle and edit stay best-effort like the FAQ workflows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blueboost_core::error::CoreError;
use blueboost_core::review::{
    sync_gate, validate_modification_reason, ReviewOperation, SyncGate,
};
use blueboost_core::types::DbId;
use blueboost_db::models::content::{ProductContent, UpdateContent};
use blueboost_db::models::status::ReviewStatus;
use blueboost_db::repositories::{ContentRepo, ProductRepo};
use blueboost_gateway::generation::ContentSyncUpdate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a staged content row or return `NotFound`.
async fn find_content(state: &AppState, id: DbId) -> AppResult<ProductContent> {
    ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductContent",
            id,
        }))
}

/// Push a review decision to the remote API under the operation's
/// documented gating policy.
async fn push_sync(
    state: &AppState,
    content_id: DbId,
    api_content_id: DbId,
    update: &ContentSyncUpdate,
    op: ReviewOperation,
) -> AppResult<()> {
    match state.gateway.update_content(api_content_id, update).await {
        Ok(()) => Ok(()),
        Err(e) => match sync_gate(op) {
            SyncGate::Strict => Err(e.into()),
            SyncGate::BestEffort => {
                tracing::warn!(content_id, error = %e, "Content sync failed; local state kept");
                Ok(())
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{product_id}/contents
pub async fn list_product_contents(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rows = ContentRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Review actions
// ---------------------------------------------------------------------------

/// POST /api/v1/contents/{id}/accept
///
/// Order of operations, each gating the next:
/// 1. remote sync (API-linked rows only);
/// 2. write the description fields onto the product;
/// 3. persist the accepted status on the staged row.
///
/// A failure at any step leaves the staged row pending.
pub async fn accept_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = find_content(&state, id).await?;

    if content.status_id != ReviewStatus::Pending.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending content can be accepted".into(),
        )));
    }

    if let Some(api_content_id) = content.api_content_id {
        let update = ContentSyncUpdate {
            status: Some("accepted"),
            is_enabled: Some(true),
            content: Some(content.generated_content.0.clone()),
            ..Default::default()
        };
        push_sync(&state, id, api_content_id, &update, ReviewOperation::Accept).await?;
    }

    let applied = ProductRepo::write_descriptions(
        &state.pool,
        content.product_id,
        &content.generated_content.0,
        content.generated_summary.as_ref().map(|s| &s.0),
    )
    .await?;
    if !applied {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: content.product_id,
        }));
    }

    ContentRepo::set_status(&state.pool, id, ReviewStatus::Accepted.id(), true).await?;
    tracing::info!(
        content_id = id,
        product_id = content.product_id,
        "Content accepted and applied to product",
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": "accepted", "applied": true }),
    }))
}

/// POST /api/v1/contents/{id}/reject
///
/// Rejection deletes the row; the sync gates the delete for API-linked
/// rows.
pub async fn reject_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = find_content(&state, id).await?;

    if let Some(api_content_id) = content.api_content_id {
        let update = ContentSyncUpdate {
            status: Some("rejected"),
            is_enabled: Some(false),
            ..Default::default()
        };
        push_sync(&state, id, api_content_id, &update, ReviewOperation::Reject).await?;
    }

    ContentRepo::delete(&state.pool, id).await?;
    tracing::info!(content_id = id, "Content rejected and deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": "rejected", "deleted": true }),
    }))
}

/// POST /api/v1/contents/{id}/toggle
pub async fn toggle_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = find_content(&state, id).await?;

    if content.status_id != ReviewStatus::Accepted.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only accepted content can be toggled".into(),
        )));
    }

    let active = !content.active;
    ContentRepo::set_active(&state.pool, id, active).await?;

    if let Some(api_content_id) = content.api_content_id {
        let update = ContentSyncUpdate {
            is_enabled: Some(active),
            ..Default::default()
        };
        push_sync(&state, id, api_content_id, &update, ReviewOperation::ToggleActive).await?;
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "active": active }),
    }))
}

/// PUT /api/v1/contents/{id}
///
/// Edit the staged text. Reason rules and best-effort sync match the FAQ
/// edit workflow.
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContent>,
) -> AppResult<impl IntoResponse> {
    let content = find_content(&state, id).await?;

    input
        .generated_content
        .require_non_blank("generated_content")
        .map_err(AppError::Core)?;

    let summary_changed = match (&content.generated_summary, &input.generated_summary) {
        (Some(old), Some(new)) => new.differs_from(&old.0),
        (None, None) => false,
        _ => true,
    };
    let changed =
        input.generated_content.differs_from(&content.generated_content.0) || summary_changed;

    validate_modification_reason(
        content.api_content_id.is_some(),
        changed,
        input.modification_reason.as_deref(),
    )
    .map_err(AppError::Core)?;

    ContentRepo::update_texts(
        &state.pool,
        id,
        &input.generated_content,
        input.generated_summary.as_ref(),
    )
    .await?;

    if changed {
        if let Some(api_content_id) = content.api_content_id {
            let update = ContentSyncUpdate {
                content: Some(input.generated_content.clone()),
                modification_reason: input.modification_reason.clone(),
                ..Default::default()
            };
            push_sync(&state, id, api_content_id, &update, ReviewOperation::Edit).await?;
        }
    }

    let updated = find_content(&state, id).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/contents/{id}
pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_content(&state, id).await?;
    ContentRepo::delete(&state.pool, id).await?;
    tracing::info!(content_id = id, "Content deleted");
    Ok(StatusCode::NO_CONTENT)
}
