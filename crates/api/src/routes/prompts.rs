//! Route definitions for remote prompt listings (PRD-02).

use axum::routing::get;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET /{kind}   -> list_prompts (kind in faq | image | content)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{kind}", get(prompts::list_prompts))
}
