//! Route definitions for staged category FAQs (PRD-05).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::category_faqs;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /{category_id}/faqs  -> list_category_faqs
/// POST   /{category_id}/faqs  -> create_category_faq (manual add)
/// ```
pub fn category_scoped_router() -> Router<AppState> {
    Router::new().route(
        "/{category_id}/faqs",
        get(category_faqs::list_category_faqs).post(category_faqs::create_category_faq),
    )
}

/// Routes mounted at `/category-faqs`.
///
/// Mirrors the product FAQ action surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(category_faqs::update_faq).delete(category_faqs::delete_faq),
        )
        .route("/{id}/accept", post(category_faqs::accept_faq))
        .route("/{id}/reject", post(category_faqs::reject_faq))
        .route("/{id}/toggle", post(category_faqs::toggle_faq))
        .route("/bulk-accept", post(category_faqs::bulk_accept))
        .route("/bulk-reject", post(category_faqs::bulk_reject))
}
