//! Bearer-token authentication middleware.
//!
//! The back office is single-tenant: operators authenticate with static
//! bearer tokens from `API_TOKENS`. Comparison is constant-time. In
//! development, missing tokens disable auth for local iteration; outside
//! development, startup fails instead.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use subtle::ConstantTimeEq;

/// Bearer-token auth settings used by [`require_bearer_auth`].
#[derive(Debug, Clone)]
pub struct AuthState {
    tokens: Arc<Vec<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Build auth config from `API_TOKENS` (comma-separated tokens).
    ///
    /// # Panics
    ///
    /// Panics when no token is configured outside development; an
    /// unauthenticated back office must not start by accident.
    pub fn from_env(is_development: bool) -> Self {
        let raw = std::env::var("API_TOKENS").unwrap_or_default();
        let tokens: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if tokens.is_empty() {
            if is_development {
                tracing::warn!(
                    "API_TOKENS not set; bearer auth disabled in development environment"
                );
                return Self {
                    tokens: Arc::new(Vec::new()),
                    enabled: false,
                };
            }
            panic!("API_TOKENS is required outside development; provide comma-separated tokens");
        }

        Self {
            tokens: Arc::new(tokens),
            enabled: true,
        }
    }

    /// Build auth state from explicit tokens (tests).
    pub fn with_tokens(tokens: Vec<String>) -> Self {
        let enabled = !tokens.is_empty();
        Self {
            tokens: Arc::new(tokens),
            enabled,
        }
    }

    /// Constant-time membership test.
    fn allows(&self, presented: &str) -> bool {
        let presented = presented.as_bytes();
        let mut matched = false;
        for token in self.tokens.iter() {
            if bool::from(token.as_bytes().ct_eq(presented)) {
                matched = true;
            }
        }
        matched
    }
}

/// Middleware enforcing bearer-token auth when enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));

    match token {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Missing or invalid bearer token",
                "code": "UNAUTHORIZED",
            })),
        )
            .into_response(),
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn allows_accepts_configured_token_only() {
        let auth = AuthState::with_tokens(vec!["alpha".into(), "beta".into()]);
        assert!(auth.allows("alpha"));
        assert!(auth.allows("beta"));
        assert!(!auth.allows("gamma"));
        assert!(!auth.allows("alph"));
    }

    #[test]
    fn empty_token_list_disables_auth() {
        let auth = AuthState::with_tokens(Vec::new());
        assert!(!auth.enabled);
    }
}
