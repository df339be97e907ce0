//! Canonical catalog entity payloads sent to the remote API (PRD-07).
//!
//! Upstream callers hand over entity data in more than one shape: a full
//! object, or just a numeric id wrapped in an object. The boundary
//! normalizes every variant into one DTO before the data reaches the
//! gateway, so the core never branches on payload shape.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::localized::LocalizedText;
use crate::types::{DbId, RequestContext};

/// Product fields the remote API receives for generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_rewrite: Option<String>,
}

/// Category fields the remote API receives for generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductData {
    /// Flatten a localized product row into the single-language payload
    /// the remote API expects, resolved against the request context.
    pub fn from_localized(
        id: DbId,
        name: &LocalizedText,
        description: &LocalizedText,
        link_rewrite: &LocalizedText,
        ctx: RequestContext,
    ) -> Result<Self, CoreError> {
        let name = name
            .get_or_any(ctx.language_id)
            .ok_or_else(|| CoreError::Validation(format!("Product {id} has no name")))?
            .to_string();
        Ok(Self {
            id,
            name,
            description: description
                .get_or_any(ctx.language_id)
                .map(str::to_string),
            link_rewrite: link_rewrite
                .get_or_any(ctx.language_id)
                .map(str::to_string),
        })
    }
}

impl CategoryData {
    pub fn from_localized(
        id: DbId,
        name: &LocalizedText,
        description: &LocalizedText,
        ctx: RequestContext,
    ) -> Result<Self, CoreError> {
        let name = name
            .get_or_any(ctx.language_id)
            .ok_or_else(|| CoreError::Validation(format!("Category {id} has no name")))?
            .to_string();
        Ok(Self {
            id,
            name,
            description: description
                .get_or_any(ctx.language_id)
                .map(str::to_string),
        })
    }
}

/// Extract an entity id from a loosely-shaped boundary payload.
///
/// Accepts a bare number, `{"id": n}`, or `{"id_product": n}` /
/// `{"id_category": n}` depending on `alias`.
pub fn normalize_entity_id(value: &serde_json::Value, alias: &str) -> Result<DbId, CoreError> {
    if let Some(id) = value.as_i64() {
        return Ok(id);
    }
    if let Some(obj) = value.as_object() {
        for key in ["id", alias] {
            if let Some(id) = obj.get(key).and_then(serde_json::Value::as_i64) {
                return Ok(id);
            }
        }
    }
    Err(CoreError::Validation(format!(
        "Expected an entity id or an object carrying 'id'/'{alias}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_number() {
        assert_eq!(normalize_entity_id(&serde_json::json!(5), "id_product").unwrap(), 5);
    }

    #[test]
    fn normalize_generic_id_key() {
        let value = serde_json::json!({"id": 9, "name": "Widget"});
        assert_eq!(normalize_entity_id(&value, "id_product").unwrap(), 9);
    }

    #[test]
    fn normalize_aliased_key() {
        let value = serde_json::json!({"id_category": 3});
        assert_eq!(normalize_entity_id(&value, "id_category").unwrap(), 3);
    }

    #[test]
    fn normalize_rejects_unusable_shapes() {
        assert!(normalize_entity_id(&serde_json::json!("five"), "id_product").is_err());
        assert!(normalize_entity_id(&serde_json::json!({"name": "x"}), "id_product").is_err());
    }

    #[test]
    fn product_data_resolves_context_language() {
        let ctx = RequestContext::new(2, 1);
        let name = LocalizedText::from_pairs([(1, "Widget"), (2, "Gadget")]);
        let empty = LocalizedText::new();
        let data = ProductData::from_localized(5, &name, &empty, &empty, ctx).unwrap();
        assert_eq!(data.name, "Gadget");
        assert_eq!(data.description, None);
    }

    #[test]
    fn product_data_requires_a_name() {
        let ctx = RequestContext::new(1, 1);
        let empty = LocalizedText::new();
        assert!(ProductData::from_localized(5, &empty, &empty, &empty, ctx).is_err());
    }
}
