use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use blueboost_gateway::{GatewayConfig, RemoteApiClient};
use blueboost_worker::{JobDispatcher, JobProcessor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blueboost_api::config::ServerConfig;
use blueboost_api::middleware::AuthState;
use blueboost_api::router::build_app_router;
use blueboost_api::state::AppState;
use blueboost_api::background;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blueboost_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let is_development = std::env::var("APP_ENV")
        .map(|v| v == "development")
        .unwrap_or(true);
    let auth = AuthState::from_env(is_development);

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = blueboost_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    blueboost_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    blueboost_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Remote API gateway ---
    let gateway = Arc::new(RemoteApiClient::new(GatewayConfig::from_env(), pool.clone()));
    if !gateway.is_configured() {
        tracing::warn!(
            "REMOTE_API_KEY not set; generation and sync calls will fail until configured"
        );
    }

    // --- Embedded job dispatcher ---
    let processor = Arc::new(JobProcessor::new(
        pool.clone(),
        Arc::clone(&gateway),
        config.staging_dir.clone(),
        config.request_context(),
    ));
    let dispatcher = JobDispatcher::new(pool.clone(), processor);
    let dispatcher_cancel = tokio_util::sync::CancellationToken::new();
    let dispatcher_cancel_clone = dispatcher_cancel.clone();
    let dispatcher_handle = tokio::spawn(async move {
        dispatcher.run(dispatcher_cancel_clone).await;
    });
    tracing::info!("Job dispatcher started");

    // --- Job retention sweep ---
    let retention_cancel = tokio_util::sync::CancellationToken::new();
    let retention_handle = tokio::spawn(background::job_retention::run(
        pool.clone(),
        config.job_retention_days,
        retention_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
    };

    // --- Router ---
    let app = build_app_router(state, &config, auth);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Let an in-flight job finish its pass before the pool closes.
    dispatcher_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(30), dispatcher_handle).await;
    tracing::info!("Job dispatcher stopped");

    retention_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), retention_handle).await;
    tracing::info!("Job retention task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
