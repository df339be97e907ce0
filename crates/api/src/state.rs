use std::sync::Arc;

use blueboost_gateway::RemoteApiClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: blueboost_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Remote content-generation API client.
    pub gateway: Arc<RemoteApiClient>,
}
