//! Health check endpoint.
//!
//! Stays outside `/api/v1` and outside bearer auth so load balancers and
//! uptime probes can hit it without credentials. Deliberately does not
//! touch the database: it reports process liveness, not dependency
//! health.

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Routes mounted at the application root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "blueboost-api",
    }))
}
