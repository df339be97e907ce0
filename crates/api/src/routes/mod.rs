pub mod category_faqs;
pub mod contents;
pub mod credits;
pub mod health;
pub mod images;
pub mod jobs;
pub mod logs;
pub mod product_faqs;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /jobs                                 list, create (GET, POST)
/// /jobs/stale                           stuck-in-processing diagnostic (GET)
/// /jobs/{id}                            poll status (GET)
///
/// /products/{product_id}/faqs           list, create (GET, POST)
/// /products/{product_id}/contents       list (GET)
/// /products/{product_id}/images         list (GET)
/// /categories/{category_id}/faqs        list, create (GET, POST)
///
/// /faqs/{id}                            edit, delete (PUT, DELETE)
/// /faqs/{id}/accept                     accept (POST)
/// /faqs/{id}/reject                     reject = delete (POST)
/// /faqs/{id}/toggle                     flip active (POST)
/// /faqs/bulk-accept                     bulk accept (POST)
/// /faqs/bulk-reject                     bulk reject (POST)
///
/// /category-faqs/...                    same surface for category FAQs
///
/// /contents/{id}                        edit, delete (PUT, DELETE)
/// /contents/{id}/accept                 accept + apply to product (POST)
/// /contents/{id}/reject                 reject = delete (POST)
/// /contents/{id}/toggle                 flip active (POST)
///
/// /images/{id}                          delete (DELETE)
/// /images/{id}/accept                   accept into catalog (POST)
/// /images/{id}/reject                   reject with reason (POST)
///
/// /logs                                 list, cleanup (GET, DELETE)
/// /logs/count                           count (GET)
///
/// /credits                              ledger listing (GET)
/// /credits/account                      remote account info (GET)
///
/// /prompts/{kind}                       remote prompt listing (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Generation jobs: create + poll.
        .nest("/jobs", jobs::router())
        // Staged rows scoped by owning entity.
        .nest(
            "/products",
            product_faqs::product_scoped_router()
                .merge(contents::product_scoped_router())
                .merge(images::product_scoped_router()),
        )
        .nest("/categories", category_faqs::category_scoped_router())
        // Review actions per staged row.
        .nest("/faqs", product_faqs::router())
        .nest("/category-faqs", category_faqs::router())
        .nest("/contents", contents::router())
        .nest("/images", images::router())
        // Remote API call audit log.
        .nest("/logs", logs::router())
        // Credit ledger and remote account info.
        .nest("/credits", credits::router())
        // Remote prompt listings.
        .nest("/prompts", prompts::router())
}
