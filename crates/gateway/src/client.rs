//! HTTP client for the remote content-generation API (PRD-02).
//!
//! [`RemoteApiClient::call`] is the single funnel for outbound traffic:
//! it enforces the API-key precondition, applies per-class timeouts,
//! classifies the outcome into [`GatewayError`], and writes an audit row
//! for every attempted request before returning.

use std::time::{Duration, Instant};

use reqwest::Method;
use sqlx::PgPool;

use crate::error::GatewayError;
use crate::logging::CallLogger;

/// Default timeout for generation calls (they render content remotely).
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

/// Default timeout for lightweight lookups (account, prompt listings).
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Remote API connection settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base HTTPS endpoint, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    /// API key; `None` disables the gateway (calls fail fast, offline).
    pub api_key: Option<String>,
    /// Timeout for generation calls (default 120 s).
    pub generation_timeout_secs: u64,
    /// Timeout for account/prompt lookups (default 30 s).
    pub lookup_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                      |
    /// |----------------------------------|------------------------------|
    /// | `REMOTE_API_BASE_URL`            | `https://api.blueboost.dev`  |
    /// | `REMOTE_API_KEY`                 | unset (gateway disabled)     |
    /// | `REMOTE_API_GENERATION_TIMEOUT`  | `120`                        |
    /// | `REMOTE_API_LOOKUP_TIMEOUT`      | `30`                         |
    pub fn from_env() -> Self {
        let base_url = std::env::var("REMOTE_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.blueboost.dev".into());

        let api_key = std::env::var("REMOTE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let generation_timeout_secs = std::env::var("REMOTE_API_GENERATION_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS);

        let lookup_timeout_secs = std::env::var("REMOTE_API_LOOKUP_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS);

        Self {
            base_url,
            api_key,
            generation_timeout_secs,
            lookup_timeout_secs,
        }
    }
}

/// Client for the remote content-generation API.
pub struct RemoteApiClient {
    http: reqwest::Client,
    config: GatewayConfig,
    logger: CallLogger,
    /// Pool handed to the credit ledger by the generation helpers.
    pub(crate) pool: PgPool,
}

impl RemoteApiClient {
    /// Create a client. The pool is used by the call logger and the
    /// credit ledger.
    pub fn new(config: GatewayConfig, pool: PgPool) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            logger: CallLogger::new(pool.clone()),
            pool,
        }
    }

    /// True when an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Timeout for generation calls.
    pub(crate) fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.config.generation_timeout_secs)
    }

    /// Timeout for account/prompt lookups.
    pub(crate) fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.config.lookup_timeout_secs)
    }

    /// Perform one call against the remote API.
    ///
    /// Classification:
    /// - no API key -> [`GatewayError::NotConfigured`], nothing sent or
    ///   logged;
    /// - no HTTP response -> [`GatewayError::Transport`];
    /// - non-2xx -> [`GatewayError::Remote`] with the body's
    ///   `message`/`error` field when present, else `HTTP error <code>`;
    /// - 2xx non-JSON body -> [`GatewayError::InvalidResponse`];
    /// - 2xx with `"success": false` -> [`GatewayError::Remote`];
    /// - otherwise the decoded JSON body.
    ///
    /// Every sent request is handed to the audit logger before this
    /// returns, whatever the outcome.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        timeout: Duration,
        context_tag: &str,
    ) -> Result<serde_json::Value, GatewayError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(GatewayError::NotConfigured);
        };

        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        let logged_headers = [
            ("X-Api-Key", api_key),
            ("Content-Type", "application/json"),
        ];

        let mut request = self
            .http
            .request(method.clone(), url.as_str())
            .header("X-Api-Key", api_key)
            .timeout(timeout);
        if let Some(json) = body {
            request = request.json(json);
        }

        let started = Instant::now();
        let response = request.send().await;
        let duration_ms = started.elapsed().as_millis() as i64;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                let message = e.to_string();
                self.logger
                    .log(
                        method.as_str(),
                        endpoint,
                        &logged_headers,
                        body,
                        0,
                        None,
                        duration_ms,
                        Some(&message),
                        Some(context_tag),
                    )
                    .await;
                return Err(GatewayError::Transport(message));
            }
        };

        let http_code = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let json: Option<serde_json::Value> = serde_json::from_str(&text).ok();

        if !(200..300).contains(&http_code) {
            let message = json
                .as_ref()
                .and_then(payload_message)
                .unwrap_or_else(|| format!("HTTP error {http_code}"));
            self.logger
                .log(
                    method.as_str(),
                    endpoint,
                    &logged_headers,
                    body,
                    http_code,
                    Some(&text),
                    duration_ms,
                    Some(&message),
                    Some(context_tag),
                )
                .await;
            return Err(GatewayError::Remote { message, http_code });
        }

        let Some(json) = json else {
            self.logger
                .log(
                    method.as_str(),
                    endpoint,
                    &logged_headers,
                    body,
                    http_code,
                    Some(&text),
                    duration_ms,
                    Some("Invalid JSON response"),
                    Some(context_tag),
                )
                .await;
            return Err(GatewayError::InvalidResponse { http_code });
        };

        // A 2xx body may still carry an explicit failure marker.
        if json.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = payload_message(&json)
                .unwrap_or_else(|| "Remote API reported failure".to_string());
            self.logger
                .log(
                    method.as_str(),
                    endpoint,
                    &logged_headers,
                    body,
                    http_code,
                    Some(&text),
                    duration_ms,
                    Some(&message),
                    Some(context_tag),
                )
                .await;
            return Err(GatewayError::Remote { message, http_code });
        }

        self.logger
            .log(
                method.as_str(),
                endpoint,
                &logged_headers,
                body,
                http_code,
                Some(&text),
                duration_ms,
                None,
                Some(context_tag),
            )
            .await;

        Ok(json)
    }
}

/// Extract a human-readable message from a response payload.
fn payload_message(json: &serde_json::Value) -> Option<String> {
    for key in ["message", "error"] {
        if let Some(msg) = json.get(key).and_then(serde_json::Value::as_str) {
            if !msg.trim().is_empty() {
                return Some(msg.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_message_prefers_message_key() {
        let json = serde_json::json!({"message": "quota exceeded", "error": "other"});
        assert_eq!(payload_message(&json), Some("quota exceeded".to_string()));
    }

    #[test]
    fn payload_message_falls_back_to_error_key() {
        let json = serde_json::json!({"error": "bad prompt"});
        assert_eq!(payload_message(&json), Some("bad prompt".to_string()));
    }

    #[test]
    fn payload_message_ignores_blank_and_missing() {
        assert_eq!(payload_message(&serde_json::json!({"message": "  "})), None);
        assert_eq!(payload_message(&serde_json::json!({"data": 1})), None);
    }
}
