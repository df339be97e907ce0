//! Handlers for staged product FAQs (PRD-05).
//!
//! Sync-gating policy per operation (see `blueboost_core::review`):
//! accept and reject push the decision to the remote API first and abort
//! on sync failure; toggle and edit persist locally and sync best-effort.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blueboost_core::error::CoreError;
use blueboost_core::review::{
    faq_text_changed, sync_gate, validate_modification_reason, ReviewOperation, SyncGate,
};
use blueboost_core::types::DbId;
use blueboost_db::models::faq::{BulkFaqRequest, CreateFaq, ProductFaq, UpdateFaq};
use blueboost_db::models::status::ReviewStatus;
use blueboost_db::repositories::{LanguageRepo, ProductFaqRepo, ProductRepo};
use blueboost_gateway::generation::FaqSyncUpdate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a staged FAQ or return `NotFound`.
async fn find_faq(state: &AppState, id: DbId) -> AppResult<ProductFaq> {
    ProductFaqRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductFaq",
            id,
        }))
}

/// Push a review decision to the remote API under the operation's
/// documented gating policy: strict operations propagate the failure,
/// best-effort ones trace it and continue.
async fn push_sync(
    state: &AppState,
    faq_id: DbId,
    api_faq_id: DbId,
    update: &FaqSyncUpdate,
    op: ReviewOperation,
) -> AppResult<()> {
    match state.gateway.update_faq(api_faq_id, update).await {
        Ok(()) => Ok(()),
        Err(e) => match sync_gate(op) {
            SyncGate::Strict => Err(e.into()),
            SyncGate::BestEffort => {
                tracing::warn!(faq_id, error = %e, "FAQ sync failed; local state kept");
                Ok(())
            }
        },
    }
}

/// Accept one staged FAQ.
///
/// Legal only from `pending`. When the row is API-linked the acceptance
/// is pushed to the remote API first; a failed sync aborts the whole
/// operation with the local row untouched.
async fn accept_one(state: &AppState, id: DbId) -> AppResult<()> {
    let faq = find_faq(state, id).await?;

    if faq.status_id != ReviewStatus::Pending.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending FAQs can be accepted".into(),
        )));
    }

    if let Some(api_faq_id) = faq.api_faq_id {
        let update = FaqSyncUpdate {
            status: Some("accepted"),
            is_enabled: Some(true),
            question: Some(faq.question.0.clone()),
            answer: Some(faq.answer.0.clone()),
            ..Default::default()
        };
        push_sync(state, id, api_faq_id, &update, ReviewOperation::Accept).await?;
    }

    ProductFaqRepo::set_status(&state.pool, id, ReviewStatus::Accepted.id(), true).await?;
    tracing::info!(faq_id = id, "Product FAQ accepted");
    Ok(())
}

/// Reject one staged FAQ. Rejection deletes the row.
///
/// When the row is API-linked the rejection sync must succeed before the
/// local delete proceeds, mirroring accept's strictness.
async fn reject_one(state: &AppState, id: DbId) -> AppResult<()> {
    let faq = find_faq(state, id).await?;

    if let Some(api_faq_id) = faq.api_faq_id {
        let update = FaqSyncUpdate {
            status: Some("rejected"),
            is_enabled: Some(false),
            ..Default::default()
        };
        push_sync(state, id, api_faq_id, &update, ReviewOperation::Reject).await?;
    }

    ProductFaqRepo::delete(&state.pool, id).await?;
    tracing::info!(faq_id = id, "Product FAQ rejected and deleted");
    Ok(())
}

/// Reject manual input keyed by a language the catalog does not have.
async fn validate_languages(state: &AppState, input: &CreateFaq) -> AppResult<()> {
    let languages = LanguageRepo::list_active(&state.pool).await?;
    let known: std::collections::HashSet<i64> = languages.iter().map(|l| l.id).collect();

    for (language_id, _) in input.question.iter().chain(input.answer.iter()) {
        if !known.contains(&language_id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Language {language_id} is not configured"
            ))));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing / manual add
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{product_id}/faqs
pub async fn list_product_faqs(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let faqs = ProductFaqRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse { data: faqs }))
}

/// POST /api/v1/products/{product_id}/faqs
///
/// Manually add a staged FAQ. Manual rows have no remote identifier, so
/// their review decisions never sync.
pub async fn create_product_faq(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<CreateFaq>,
) -> AppResult<impl IntoResponse> {
    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    input.question.require_non_blank("question").map_err(AppError::Core)?;
    input.answer.require_non_blank("answer").map_err(AppError::Core)?;
    validate_languages(&state, &input).await?;

    let input = CreateFaq {
        api_faq_id: None,
        ..input
    };
    let faq = ProductFaqRepo::create(&state.pool, product_id, &input).await?;

    tracing::info!(faq_id = faq.id, product_id, "Product FAQ created manually");
    Ok((StatusCode::CREATED, Json(DataResponse { data: faq })))
}

// ---------------------------------------------------------------------------
// Review actions
// ---------------------------------------------------------------------------

/// POST /api/v1/faqs/{id}/accept
pub async fn accept_faq(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    accept_one(&state, id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": "accepted" }),
    }))
}

/// POST /api/v1/faqs/{id}/reject
pub async fn reject_faq(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    reject_one(&state, id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": "rejected", "deleted": true }),
    }))
}

/// POST /api/v1/faqs/{id}/toggle
///
/// Flip the active flag of an accepted FAQ. The local flip always
/// happens; the remote sync of the new enabled flag is best-effort so a
/// flaky network cannot block simple curation.
pub async fn toggle_faq(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let faq = find_faq(&state, id).await?;

    if faq.status_id != ReviewStatus::Accepted.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only accepted FAQs can be toggled".into(),
        )));
    }

    let active = !faq.active;
    ProductFaqRepo::set_active(&state.pool, id, active).await?;

    if let Some(api_faq_id) = faq.api_faq_id {
        let update = FaqSyncUpdate {
            is_enabled: Some(active),
            ..Default::default()
        };
        push_sync(&state, id, api_faq_id, &update, ReviewOperation::ToggleActive).await?;
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "active": active }),
    }))
}

/// PUT /api/v1/faqs/{id}
///
/// Edit a staged FAQ's text. For API-linked rows whose text actually
/// changed, a non-empty modification reason is mandatory and is checked
/// before any remote call or persistence. The edit persists locally even
/// when the sync push fails.
pub async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFaq>,
) -> AppResult<impl IntoResponse> {
    let faq = find_faq(&state, id).await?;

    input.question.require_non_blank("question").map_err(AppError::Core)?;
    input.answer.require_non_blank("answer").map_err(AppError::Core)?;

    let changed = faq_text_changed(&faq.question.0, &faq.answer.0, &input.question, &input.answer);
    validate_modification_reason(
        faq.api_faq_id.is_some(),
        changed,
        input.modification_reason.as_deref(),
    )
    .map_err(AppError::Core)?;

    ProductFaqRepo::update_texts(&state.pool, id, &input.question, &input.answer).await?;

    if changed {
        if let Some(api_faq_id) = faq.api_faq_id {
            let update = FaqSyncUpdate {
                question: Some(input.question.clone()),
                answer: Some(input.answer.clone()),
                modification_reason: input.modification_reason.clone(),
                ..Default::default()
            };
            push_sync(&state, id, api_faq_id, &update, ReviewOperation::Edit).await?;
        }
    }

    let updated = find_faq(&state, id).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/faqs/{id}
pub async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_faq(&state, id).await?;
    ProductFaqRepo::delete(&state.pool, id).await?;
    tracing::info!(faq_id = id, "Product FAQ deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bulk actions
// ---------------------------------------------------------------------------

/// POST /api/v1/faqs/bulk-accept
///
/// Per-item failures are counted, not detailed: bulk review is a
/// curation sweep, and the operator re-checks leftovers in the UI.
pub async fn bulk_accept(
    State(state): State<AppState>,
    Json(input): Json<BulkFaqRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = input.ids.into_ids();
    let mut accepted = 0usize;
    let mut failed = 0usize;

    for id in ids {
        match accept_one(&state, id).await {
            Ok(()) => accepted += 1,
            Err(_) => failed += 1,
        }
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "accepted": accepted, "failed": failed }),
    }))
}

/// POST /api/v1/faqs/bulk-reject
///
/// Accepts either a JSON id array or a comma-joined string.
pub async fn bulk_reject(
    State(state): State<AppState>,
    Json(input): Json<BulkFaqRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = input.ids.into_ids();
    let mut rejected = 0usize;
    let mut failed = 0usize;

    for id in ids {
        match reject_one(&state, id).await {
            Ok(()) => rejected += 1,
            Err(_) => failed += 1,
        }
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "rejected": rejected, "failed": failed }),
    }))
}
