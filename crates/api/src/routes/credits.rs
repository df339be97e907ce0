//! Route definitions for the credit ledger and account info (PRD-03).

use axum::routing::get;
use axum::Router;

use crate::handlers::credits;
use crate::state::AppState;

/// Routes mounted at `/credits`.
///
/// ```text
/// GET /          -> list_credits (local ledger)
/// GET /account   -> account_info (proxied to the remote API)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(credits::list_credits))
        .route("/account", get(credits::account_info))
}
