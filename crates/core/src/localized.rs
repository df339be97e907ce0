//! Language-keyed text values (PRD-05).
//!
//! Catalog text fields are "for every configured language, a string".
//! [`LocalizedText`] models that as an explicit map from language id to
//! text, with a per-key diff used by the edit workflow to decide whether
//! content actually changed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::LanguageId;

/// A text value per configured language.
///
/// Serialized as a plain JSON object keyed by language id, which is also
/// the JSONB shape stored in the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<LanguageId, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from an iterator of `(language_id, text)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (LanguageId, S)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(id, text)| (id, text.into()))
                .collect(),
        )
    }

    pub fn get(&self, language_id: LanguageId) -> Option<&str> {
        self.0.get(&language_id).map(String::as_str)
    }

    /// Text for `language_id`, falling back to any non-empty value.
    pub fn get_or_any(&self, language_id: LanguageId) -> Option<&str> {
        self.get(language_id)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.0
                    .values()
                    .map(String::as_str)
                    .find(|t| !t.trim().is_empty())
            })
    }

    pub fn insert(&mut self, language_id: LanguageId, text: impl Into<String>) {
        self.0.insert(language_id, text.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (LanguageId, &str)> {
        self.0.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every stored value is blank.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|t| t.trim().is_empty())
    }

    /// Per-key diff against a previous value.
    ///
    /// A language counts as changed when it is present on one side only
    /// or when its text differs. This is the comparison the edit workflow
    /// uses to decide whether a modification reason is required.
    pub fn differs_from(&self, other: &LocalizedText) -> bool {
        self.0 != other.0
    }

    /// Validate that at least one language carries non-blank text.
    pub fn require_non_blank(&self, field: &str) -> Result<(), CoreError> {
        if self.is_blank() {
            return Err(CoreError::Validation(format!(
                "Field '{field}' must contain text for at least one language"
            )));
        }
        Ok(())
    }
}

impl FromIterator<(LanguageId, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (LanguageId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_any_prefers_requested_language() {
        let text = LocalizedText::from_pairs([(1, "en"), (2, "fr")]);
        assert_eq!(text.get_or_any(2), Some("fr"));
    }

    #[test]
    fn get_or_any_falls_back_when_blank() {
        let text = LocalizedText::from_pairs([(1, "  "), (2, "fr")]);
        assert_eq!(text.get_or_any(1), Some("fr"));
    }

    #[test]
    fn differs_from_detects_value_change() {
        let before = LocalizedText::from_pairs([(1, "q"), (2, "q2")]);
        let after = LocalizedText::from_pairs([(1, "q"), (2, "edited")]);
        assert!(after.differs_from(&before));
    }

    #[test]
    fn differs_from_detects_added_language() {
        let before = LocalizedText::from_pairs([(1, "q")]);
        let after = LocalizedText::from_pairs([(1, "q"), (2, "q2")]);
        assert!(after.differs_from(&before));
    }

    #[test]
    fn identical_maps_do_not_differ() {
        let before = LocalizedText::from_pairs([(1, "q"), (2, "q2")]);
        let after = before.clone();
        assert!(!after.differs_from(&before));
    }

    #[test]
    fn require_non_blank_rejects_all_blank() {
        let text = LocalizedText::from_pairs([(1, ""), (2, "   ")]);
        assert!(text.require_non_blank("question").is_err());
    }

    #[test]
    fn require_non_blank_accepts_one_filled_language() {
        let text = LocalizedText::from_pairs([(1, ""), (2, "filled")]);
        assert!(text.require_non_blank("question").is_ok());
    }

    #[test]
    fn serializes_as_plain_object() {
        let text = LocalizedText::from_pairs([(1, "hello")]);
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json, serde_json::json!({"1": "hello"}));
    }
}
