//! Review workflow rules shared by FAQ, content, and image staging rows
//! (PRD-05).
//!
//! Staged rows move pending -> accepted or pending -> rejected. Acceptance
//! may flip `active` on and off afterwards without touching the status.
//! Whether a remote sync outcome gates the local write differs per
//! operation and is intentional behavior, captured here as [`SyncGate`]
//! so each handler documents its policy instead of hard-coding it.

use serde::Deserialize;

use crate::error::CoreError;
use crate::localized::LocalizedText;
use crate::types::DbId;

/// Maximum length for a rejection reason.
pub const MAX_REJECTION_REASON_LENGTH: usize = 2_000;

/// Maximum length for an edit's modification reason.
pub const MAX_MODIFICATION_REASON_LENGTH: usize = 2_000;

// ---------------------------------------------------------------------------
// Sync gating policy
// ---------------------------------------------------------------------------

/// How a remote-API sync outcome relates to the local write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncGate {
    /// The sync must succeed before anything is persisted locally.
    Strict,
    /// The sync is attempted but its outcome never blocks the local write.
    BestEffort,
}

/// Review operations that may carry a remote sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOperation {
    Accept,
    Reject,
    ToggleActive,
    Edit,
}

/// Documented sync-gating policy per operation.
///
/// Accept and reject are strict: a review decision that the remote system
/// never learned about must not take local effect. Toggling visibility and
/// editing text are best-effort so routine curation is not blocked by a
/// flaky network.
pub fn sync_gate(op: ReviewOperation) -> SyncGate {
    match op {
        ReviewOperation::Accept | ReviewOperation::Reject => SyncGate::Strict,
        ReviewOperation::ToggleActive | ReviewOperation::Edit => SyncGate::BestEffort,
    }
}

// ---------------------------------------------------------------------------
// Edit validation
// ---------------------------------------------------------------------------

/// Decide whether an edit requires a modification reason, and validate it.
///
/// A reason is mandatory exactly when the row is linked to a remote record
/// (`has_remote_id`) and the localized text actually changed. The check
/// runs before any gateway call or persistence.
pub fn validate_modification_reason(
    has_remote_id: bool,
    text_changed: bool,
    reason: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(r) = reason {
        if r.len() > MAX_MODIFICATION_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "Modification reason exceeds maximum length of {MAX_MODIFICATION_REASON_LENGTH} characters"
            )));
        }
    }

    if !has_remote_id || !text_changed {
        return Ok(());
    }

    match reason {
        Some(r) if !r.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(
            "A modification reason is required when editing content linked to the remote API"
                .to_string(),
        )),
    }
}

/// Per-language comparison of the editable text fields of a FAQ row.
pub fn faq_text_changed(
    old_question: &LocalizedText,
    old_answer: &LocalizedText,
    new_question: &LocalizedText,
    new_answer: &LocalizedText,
) -> bool {
    new_question.differs_from(old_question) || new_answer.differs_from(old_answer)
}

/// Validate an optional rejection reason's length.
pub fn validate_rejection_reason(reason: Option<&str>) -> Result<(), CoreError> {
    if let Some(r) = reason {
        if r.len() > MAX_REJECTION_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "Rejection reason exceeds maximum length of {MAX_REJECTION_REASON_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bulk id lists
// ---------------------------------------------------------------------------

/// Id list accepted by the bulk endpoints.
///
/// Form submissions post a comma-joined string, AJAX clients post a JSON
/// array; both deserialize into the same handler input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Ids(Vec<DbId>),
    Joined(String),
}

impl IdList {
    /// Flatten into ids, skipping blanks and non-numeric segments.
    pub fn into_ids(self) -> Vec<DbId> {
        match self {
            IdList::Ids(ids) => ids,
            IdList::Joined(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_and_reject_are_strict() {
        assert_eq!(sync_gate(ReviewOperation::Accept), SyncGate::Strict);
        assert_eq!(sync_gate(ReviewOperation::Reject), SyncGate::Strict);
    }

    #[test]
    fn toggle_and_edit_are_best_effort() {
        assert_eq!(sync_gate(ReviewOperation::ToggleActive), SyncGate::BestEffort);
        assert_eq!(sync_gate(ReviewOperation::Edit), SyncGate::BestEffort);
    }

    #[test]
    fn reason_required_when_remote_and_changed() {
        let result = validate_modification_reason(true, true, None);
        assert!(result.is_err());

        let result = validate_modification_reason(true, true, Some("   "));
        assert!(result.is_err());
    }

    #[test]
    fn reason_optional_without_remote_id() {
        assert!(validate_modification_reason(false, true, None).is_ok());
    }

    #[test]
    fn reason_optional_when_text_unchanged() {
        assert!(validate_modification_reason(true, false, None).is_ok());
    }

    #[test]
    fn reason_accepted_when_present() {
        assert!(validate_modification_reason(true, true, Some("fixed typo")).is_ok());
    }

    #[test]
    fn overlong_reason_rejected_even_when_optional() {
        let long = "x".repeat(MAX_MODIFICATION_REASON_LENGTH + 1);
        assert!(validate_modification_reason(false, false, Some(&long)).is_err());
    }

    #[test]
    fn faq_text_changed_checks_both_fields() {
        let q = LocalizedText::from_pairs([(1, "q")]);
        let a = LocalizedText::from_pairs([(1, "a")]);
        let a2 = LocalizedText::from_pairs([(1, "edited")]);

        assert!(!faq_text_changed(&q, &a, &q, &a));
        assert!(faq_text_changed(&q, &a, &q, &a2));
    }

    #[test]
    fn id_list_from_vec() {
        let list = IdList::Ids(vec![1, 2, 3]);
        assert_eq!(list.into_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn id_list_from_joined_string() {
        let list = IdList::Joined("4, 5,6,,x".to_string());
        assert_eq!(list.into_ids(), vec![4, 5, 6]);
    }

    #[test]
    fn id_list_deserializes_both_shapes() {
        let from_array: IdList = serde_json::from_value(serde_json::json!([1, 2])).unwrap();
        assert_eq!(from_array.into_ids(), vec![1, 2]);

        let from_string: IdList = serde_json::from_value(serde_json::json!("7,8")).unwrap();
        assert_eq!(from_string.into_ids(), vec![7, 8]);
    }
}
