//! Route definitions for staged product images (PRD-06).

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /{product_id}/images  -> list_product_images
/// ```
pub fn product_scoped_router() -> Router<AppState> {
    Router::new().route("/{product_id}/images", get(images::list_product_images))
}

/// Routes mounted at `/images`.
///
/// ```text
/// DELETE /{id}          -> delete_image
/// POST   /{id}/accept   -> accept_image (into the live catalog)
/// POST   /{id}/reject   -> reject_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(images::delete_image))
        .route("/{id}/accept", post(images::accept_image))
        .route("/{id}/reject", post(images::reject_image))
}
