//! Route definitions for staged product FAQs (PRD-05).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::product_faqs;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /{product_id}/faqs   -> list_product_faqs
/// POST   /{product_id}/faqs   -> create_product_faq (manual add)
/// ```
pub fn product_scoped_router() -> Router<AppState> {
    Router::new().route(
        "/{product_id}/faqs",
        get(product_faqs::list_product_faqs).post(product_faqs::create_product_faq),
    )
}

/// Routes mounted at `/faqs`.
///
/// ```text
/// PUT    /{id}          -> update_faq (edit)
/// DELETE /{id}          -> delete_faq
/// POST   /{id}/accept   -> accept_faq
/// POST   /{id}/reject   -> reject_faq (deletes the row)
/// POST   /{id}/toggle   -> toggle_faq
/// POST   /bulk-accept   -> bulk_accept
/// POST   /bulk-reject   -> bulk_reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(product_faqs::update_faq).delete(product_faqs::delete_faq),
        )
        .route("/{id}/accept", post(product_faqs::accept_faq))
        .route("/{id}/reject", post(product_faqs::reject_faq))
        .route("/{id}/toggle", post(product_faqs::toggle_faq))
        .route("/bulk-accept", post(product_faqs::bulk_accept))
        .route("/bulk-reject", post(product_faqs::bulk_reject))
}
