use std::path::PathBuf;

use blueboost_core::types::RequestContext;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding staged generated images awaiting review.
    pub staging_dir: PathBuf,
    /// Root of the live catalog image storage.
    pub media_dir: PathBuf,
    /// Default language for operations that need a single language.
    pub language_id: i64,
    /// Shop the back office manages.
    pub shop_id: i64,
    /// Retention for terminal generation jobs, in days (default: `30`).
    pub job_retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                  |
    /// |-----------------------|--------------------------|
    /// | `HOST`                | `0.0.0.0`                |
    /// | `PORT`                | `3000`                   |
    /// | `CORS_ORIGINS`        | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`| `30`                     |
    /// | `STAGING_DIR`         | `data/staging`           |
    /// | `MEDIA_DIR`           | `data/media`             |
    /// | `DEFAULT_LANGUAGE_ID` | `1`                      |
    /// | `SHOP_ID`             | `1`                      |
    /// | `JOB_RETENTION_DAYS`  | `30`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let staging_dir: PathBuf = std::env::var("STAGING_DIR")
            .unwrap_or_else(|_| "data/staging".into())
            .into();

        let media_dir: PathBuf = std::env::var("MEDIA_DIR")
            .unwrap_or_else(|_| "data/media".into())
            .into();

        let language_id: i64 = std::env::var("DEFAULT_LANGUAGE_ID")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("DEFAULT_LANGUAGE_ID must be a valid i64");

        let shop_id: i64 = std::env::var("SHOP_ID")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("SHOP_ID must be a valid i64");

        let job_retention_days: i64 = std::env::var("JOB_RETENTION_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("JOB_RETENTION_DAYS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            staging_dir,
            media_dir,
            language_id,
            shop_id,
            job_retention_days,
        }
    }

    /// The request context every core operation runs in.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.language_id, self.shop_id)
    }
}
