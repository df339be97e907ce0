//! Typed endpoint helpers over [`RemoteApiClient::call`] (PRD-02/PRD-03).
//!
//! Each helper shapes the request body for one remote endpoint and
//! decodes the response defensively: the remote contract does not
//! guarantee the documented shapes, so every list field defaults to
//! empty instead of failing the decode. FAQ/content/image generation
//! helpers also append a credit-ledger entry when the response reports
//! consumption.

use blueboost_core::catalog::{CategoryData, ProductData};
use blueboost_core::localized::LocalizedText;
use blueboost_core::types::DbId;
use blueboost_db::models::credit::CreateCreditEntry;
use blueboost_db::repositories::CreditRepo;
use reqwest::Method;
use serde::Deserialize;

use crate::client::RemoteApiClient;
use crate::error::GatewayError;

// ---------------------------------------------------------------------------
// Response payload shapes (parsed defensively)
// ---------------------------------------------------------------------------

/// Answer wrapper inside a generated FAQ item.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerText {
    #[serde(default)]
    pub text: String,
}

/// One generated FAQ entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedFaqItem {
    /// Remote-system identifier for later sync calls.
    pub id: Option<DbId>,
    /// The question text.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "acceptedAnswer", default = "empty_answer")]
    pub accepted_answer: AnswerText,
}

fn empty_answer() -> AnswerText {
    AnswerText {
        text: String::new(),
    }
}

/// Payload of a FAQ generation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqGenerationData {
    #[serde(rename = "mainEntity", default)]
    pub main_entity: Vec<GeneratedFaqItem>,
}

/// One generated image, base64-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub base64: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub index: i32,
}

/// Per-item error reported inside an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemError {
    pub index: Option<i32>,
    #[serde(default)]
    pub error: String,
}

/// Payload of an image generation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageGenerationData {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    #[serde(default)]
    pub errors: Vec<ItemError>,
}

/// One generated product description.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedDescription {
    /// Remote-system identifier for later sync calls.
    pub id: Option<DbId>,
    pub description_long: Option<String>,
    pub description_short: Option<String>,
}

/// Payload of a content generation response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentGenerationData {
    #[serde(default)]
    pub descriptions: Vec<GeneratedDescription>,
}

/// Decoded generation response: typed payload plus credit fields.
#[derive(Debug, Clone)]
pub struct GenerationResult<T> {
    pub data: T,
    pub credits_used: i32,
    pub credits_remaining: Option<i32>,
}

/// Account/credit info reported by the remote API.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub credits_remaining: i32,
    pub plan: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Sync payloads (local review decisions pushed back to the remote API)
// ---------------------------------------------------------------------------

/// Fields pushed on a FAQ sync (accept/reject/toggle/edit).
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct FaqSyncUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Fields pushed on a content sync.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ContentSyncUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl RemoteApiClient {
    /// POST /faqs/generate for a product.
    pub async fn generate_product_faqs(
        &self,
        prompt_id: DbId,
        product: &ProductData,
    ) -> Result<GenerationResult<FaqGenerationData>, GatewayError> {
        let body = serde_json::json!({
            "prompt_id": prompt_id,
            "type": "product",
            "product": product,
        });
        let json = self
            .call(
                Method::POST,
                "faqs/generate",
                Some(&body),
                self.generation_timeout(),
                "faq_generation",
            )
            .await?;
        let result = decode_generation::<FaqGenerationData>(&json)?;
        self.record_credits("faq", Some("product"), Some(product.id), &result)
            .await;
        Ok(result)
    }

    /// POST /faqs/generate for a category.
    pub async fn generate_category_faqs(
        &self,
        prompt_id: DbId,
        category: &CategoryData,
    ) -> Result<GenerationResult<FaqGenerationData>, GatewayError> {
        let body = serde_json::json!({
            "prompt_id": prompt_id,
            "type": "category",
            "category": category,
        });
        let json = self
            .call(
                Method::POST,
                "faqs/generate",
                Some(&body),
                self.generation_timeout(),
                "faq_generation",
            )
            .await?;
        let result = decode_generation::<FaqGenerationData>(&json)?;
        self.record_credits("faq", Some("category"), Some(category.id), &result)
            .await;
        Ok(result)
    }

    /// POST /images/generate for a product.
    pub async fn generate_images(
        &self,
        prompt_ids: &[DbId],
        product: &ProductData,
    ) -> Result<GenerationResult<ImageGenerationData>, GatewayError> {
        let body = serde_json::json!({
            "prompt_ids": prompt_ids,
            "product": product,
        });
        let json = self
            .call(
                Method::POST,
                "images/generate",
                Some(&body),
                self.generation_timeout(),
                "image_generation",
            )
            .await?;
        let result = decode_generation::<ImageGenerationData>(&json)?;
        self.record_credits("image", Some("product"), Some(product.id), &result)
            .await;
        Ok(result)
    }

    /// POST /contents/generate for a product.
    pub async fn generate_content(
        &self,
        prompt_id: DbId,
        product: &ProductData,
    ) -> Result<GenerationResult<ContentGenerationData>, GatewayError> {
        let body = serde_json::json!({
            "prompt_id": prompt_id,
            "product": product,
        });
        let json = self
            .call(
                Method::POST,
                "contents/generate",
                Some(&body),
                self.generation_timeout(),
                "content_generation",
            )
            .await?;
        let result = decode_generation::<ContentGenerationData>(&json)?;
        self.record_credits("content", Some("product"), Some(product.id), &result)
            .await;
        Ok(result)
    }

    /// GET /prompts/{kind} -- prompt listings pass through verbatim.
    pub async fn list_prompts(&self, kind: &str) -> Result<serde_json::Value, GatewayError> {
        self.call(
            Method::GET,
            &format!("prompts/{kind}"),
            None,
            self.lookup_timeout(),
            "prompts",
        )
        .await
    }

    /// GET /account.
    pub async fn account_info(&self) -> Result<AccountInfo, GatewayError> {
        let json = self
            .call(
                Method::GET,
                "account",
                None,
                self.lookup_timeout(),
                "account",
            )
            .await?;
        serde_json::from_value(json).map_err(|_| GatewayError::InvalidResponse { http_code: 200 })
    }

    /// PUT /faqs/{api_faq_id} -- push a local review decision or edit.
    pub async fn update_faq(
        &self,
        api_faq_id: DbId,
        update: &FaqSyncUpdate,
    ) -> Result<(), GatewayError> {
        let body = serde_json::to_value(update)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        self.call(
            Method::PUT,
            &format!("faqs/{api_faq_id}"),
            Some(&body),
            self.lookup_timeout(),
            "faq_sync",
        )
        .await?;
        Ok(())
    }

    /// PUT /contents/{api_content_id} -- push a local review decision or edit.
    pub async fn update_content(
        &self,
        api_content_id: DbId,
        update: &ContentSyncUpdate,
    ) -> Result<(), GatewayError> {
        let body = serde_json::to_value(update)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        self.call(
            Method::PUT,
            &format!("contents/{api_content_id}"),
            Some(&body),
            self.lookup_timeout(),
            "content_sync",
        )
        .await?;
        Ok(())
    }

    /// POST /images/reject -- report a rejected generated image by its
    /// prompt id.
    pub async fn reject_image(
        &self,
        prompt_id: DbId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "prompt_id": prompt_id,
            "rejection_reason": reason,
        });
        self.call(
            Method::POST,
            "images/reject",
            Some(&body),
            self.lookup_timeout(),
            "image_sync",
        )
        .await?;
        Ok(())
    }

    /// Append a credit-ledger entry when the response reports usage.
    ///
    /// Ledger writes are analytics; a storage failure is traced and
    /// swallowed so it cannot fail the generation that already happened.
    async fn record_credits<T>(
        &self,
        service: &str,
        entity_type: Option<&str>,
        entity_id: Option<DbId>,
        result: &GenerationResult<T>,
    ) {
        if result.credits_used <= 0 {
            return;
        }
        let entry = CreateCreditEntry {
            service: service.to_string(),
            credits_used: result.credits_used,
            credits_remaining: result.credits_remaining,
            entity_type: entity_type.map(str::to_string),
            entity_id,
            detail: None,
        };
        if let Err(e) = CreditRepo::record(&self.pool, &entry).await {
            tracing::warn!(
                service,
                credits_used = result.credits_used,
                error = %e,
                "Failed to record credit ledger entry; continuing",
            );
        }
    }
}

/// Decode a generation response body into its typed payload.
///
/// The `data` key may be missing entirely; that decodes to the payload's
/// default (empty lists), which the processor then treats as a no-results
/// failure.
fn decode_generation<T>(json: &serde_json::Value) -> Result<GenerationResult<T>, GatewayError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let data = match json.get("data") {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|_| GatewayError::InvalidResponse { http_code: 200 })?,
        None => T::default(),
    };
    let credits_used = json
        .get("credits_used")
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0) as i32;
    let credits_remaining = json
        .get("credits_remaining")
        .and_then(serde_json::Value::as_i64)
        .map(|v| v as i32);

    Ok(GenerationResult {
        data,
        credits_used,
        credits_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_faq_payload() {
        let json = serde_json::json!({
            "success": true,
            "data": {
                "mainEntity": [
                    {"id": 100, "name": "What is it?", "acceptedAnswer": {"text": "A widget."}}
                ]
            },
            "credits_used": 2,
            "credits_remaining": 98
        });
        let result = decode_generation::<FaqGenerationData>(&json).unwrap();
        assert_eq!(result.data.main_entity.len(), 1);
        assert_eq!(result.data.main_entity[0].id, Some(100));
        assert_eq!(result.data.main_entity[0].accepted_answer.text, "A widget.");
        assert_eq!(result.credits_used, 2);
        assert_eq!(result.credits_remaining, Some(98));
    }

    #[test]
    fn decodes_image_payload_with_item_errors() {
        let json = serde_json::json!({
            "data": {
                "images": [{"base64": "aGk=", "mime_type": "image/png", "index": 0}],
                "errors": [{"index": 1, "error": "nsfw filter"}]
            }
        });
        let result = decode_generation::<ImageGenerationData>(&json).unwrap();
        assert_eq!(result.data.images.len(), 1);
        assert_eq!(result.data.errors.len(), 1);
        assert_eq!(result.credits_used, 0);
    }

    #[test]
    fn missing_data_key_decodes_to_empty_payload() {
        let json = serde_json::json!({"success": true});
        let result = decode_generation::<ContentGenerationData>(&json).unwrap();
        assert!(result.data.descriptions.is_empty());
    }

    #[test]
    fn malformed_data_is_an_invalid_response() {
        let json = serde_json::json!({"data": "not-an-object"});
        let result = decode_generation::<FaqGenerationData>(&json);
        assert!(result.is_err());
    }

    #[test]
    fn sync_update_skips_absent_fields() {
        let update = FaqSyncUpdate {
            status: Some("accepted"),
            is_enabled: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "accepted", "is_enabled": true}));
    }
}
