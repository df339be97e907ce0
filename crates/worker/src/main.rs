//! Standalone worker binary.
//!
//! Runs the job dispatcher against the configured database. The API
//! server embeds the same dispatcher; this binary exists for deployments
//! that separate serving from processing.

use std::path::PathBuf;
use std::sync::Arc;

use blueboost_core::types::RequestContext;
use blueboost_gateway::{GatewayConfig, RemoteApiClient};
use blueboost_worker::{JobDispatcher, JobProcessor};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueboost_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = blueboost_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    blueboost_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let staging_dir: PathBuf = std::env::var("STAGING_DIR")
        .unwrap_or_else(|_| "data/staging".into())
        .into();

    let language_id: i64 = std::env::var("DEFAULT_LANGUAGE_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let shop_id: i64 = std::env::var("SHOP_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    let gateway = Arc::new(RemoteApiClient::new(GatewayConfig::from_env(), pool.clone()));
    if !gateway.is_configured() {
        tracing::warn!("REMOTE_API_KEY not set; generation jobs will fail until configured");
    }

    let processor = Arc::new(JobProcessor::new(
        pool.clone(),
        gateway,
        staging_dir,
        RequestContext::new(language_id, shop_id),
    ));
    let dispatcher = JobDispatcher::new(pool, processor);

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received SIGINT, stopping dispatcher");
            cancel_on_signal.cancel();
        }
    });

    dispatcher.run(cancel).await;
    tracing::info!("Worker stopped");
}
