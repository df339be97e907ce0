//! Audit logging for outbound remote API calls (PRD-02).
//!
//! Every gateway call is logged regardless of its outcome. A logging
//! failure must never fail the business operation that triggered the
//! call, so `log` swallows storage errors after tracing them.

use blueboost_core::masking::mask_credential;
use blueboost_db::models::api_log::{ApiCallLog, CreateApiCallLog};
use blueboost_db::repositories::ApiLogRepo;
use sqlx::PgPool;

/// Header names whose values are masked before persisting.
const CREDENTIAL_HEADERS: &[&str] = &["x-api-key", "authorization"];

/// Writes one audit row per outbound gateway call.
#[derive(Clone)]
pub struct CallLogger {
    pool: PgPool,
}

impl CallLogger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist one call record. Returns `None` on storage failure.
    #[allow(clippy::too_many_arguments)]
    pub async fn log(
        &self,
        method: &str,
        endpoint: &str,
        request_headers: &[(&str, &str)],
        request_body: Option<&serde_json::Value>,
        http_code: u16,
        response_body: Option<&str>,
        duration_ms: i64,
        error_message: Option<&str>,
        context_tag: Option<&str>,
    ) -> Option<ApiCallLog> {
        let entry = CreateApiCallLog {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            request_headers: mask_headers(request_headers),
            request_body: request_body.cloned(),
            response_body: response_body.map(str::to_string),
            http_code: i32::from(http_code),
            duration_ms,
            error_message: error_message.map(str::to_string),
            context_tag: context_tag.map(str::to_string),
        };

        match ApiLogRepo::insert(&self.pool, &entry).await {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(
                    endpoint,
                    error = %e,
                    "Failed to write API call log entry; continuing",
                );
                None
            }
        }
    }
}

/// Build the persisted header map, masking credential values.
fn mask_headers(headers: &[(&str, &str)]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(name, value)| {
            let stored = if CREDENTIAL_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                mask_credential(value)
            } else {
                (*value).to_string()
            };
            (name.to_string(), serde_json::Value::String(stored))
        })
        .collect();
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_headers_are_masked() {
        let headers = [
            ("X-Api-Key", "sk-live-0123456789abcdef"),
            ("Content-Type", "application/json"),
        ];
        let masked = mask_headers(&headers);
        assert_eq!(masked["X-Api-Key"], "sk-live-...cdef");
        assert_eq!(masked["Content-Type"], "application/json");
    }

    #[test]
    fn masking_is_case_insensitive() {
        let masked = mask_headers(&[("AUTHORIZATION", "Bearer-token-value-long")]);
        assert_eq!(masked["AUTHORIZATION"], "Bearer-t...long");
    }
}
