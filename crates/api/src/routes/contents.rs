//! Route definitions for staged product descriptions (PRD-05).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::contents;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /{product_id}/contents  -> list_product_contents
/// ```
pub fn product_scoped_router() -> Router<AppState> {
    Router::new().route(
        "/{product_id}/contents",
        get(contents::list_product_contents),
    )
}

/// Routes mounted at `/contents`.
///
/// ```text
/// PUT    /{id}          -> update_content (edit)
/// DELETE /{id}          -> delete_content
/// POST   /{id}/accept   -> accept_content (applies to the product)
/// POST   /{id}/reject   -> reject_content (deletes the row)
/// POST   /{id}/toggle   -> toggle_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(contents::update_content).delete(contents::delete_content),
        )
        .route("/{id}/accept", post(contents::accept_content))
        .route("/{id}/reject", post(contents::reject_content))
        .route("/{id}/toggle", post(contents::toggle_content))
}
