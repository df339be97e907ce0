//! Route definitions for the remote API call log (PRD-02).

use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// GET    /        -> list_logs (?context_tag, ?limit, ?offset)
/// DELETE /        -> cleanup_logs (?older_than_days; absent = all)
/// GET    /count   -> count_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(logs::list_logs).delete(logs::cleanup_logs))
        .route("/count", get(logs::count_logs))
}
