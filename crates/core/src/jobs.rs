//! Generation job types, parameter decoding, and progress math (PRD-04).
//!
//! A job row stores its input as an opaque JSONB blob; the processor
//! decodes it into one of the typed parameter structs below. A decode
//! failure is a local, non-retryable validation error, not a gateway
//! error.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Job types
// ---------------------------------------------------------------------------

/// FAQ generation job type tag.
pub const JOB_TYPE_FAQ: &str = "faq";
/// Image generation job type tag.
pub const JOB_TYPE_IMAGE: &str = "image";
/// Description generation job type tag.
pub const JOB_TYPE_CONTENT: &str = "content";

/// All valid job type tags.
pub const VALID_JOB_TYPES: &[&str] = &[JOB_TYPE_FAQ, JOB_TYPE_IMAGE, JOB_TYPE_CONTENT];

/// Validate a job type tag from the create-job endpoint.
pub fn validate_job_type(job_type: &str) -> Result<(), CoreError> {
    if VALID_JOB_TYPES.contains(&job_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid job type '{job_type}'. Must be one of: {}",
            VALID_JOB_TYPES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Typed request parameters
// ---------------------------------------------------------------------------

/// Target of a FAQ generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum FaqTarget {
    Product(DbId),
    Category(DbId),
}

/// Parameters of a FAQ generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqJobParams {
    pub prompt_id: DbId,
    #[serde(flatten)]
    pub target: FaqTarget,
}

/// Parameters of an image generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageJobParams {
    pub product_id: DbId,
    pub prompt_ids: Vec<DbId>,
}

/// Parameters of a description generation job.
///
/// Always a batch: a single product is a batch of one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentJobParams {
    pub prompt_id: DbId,
    pub product_ids: Vec<DbId>,
}

/// Error message recorded when stored parameters fail to decode.
pub const INVALID_JOB_PARAMETERS: &str = "Invalid job parameters";

/// Decode a job's stored `request_data` into typed parameters.
///
/// Missing or malformed keys map to [`CoreError::Validation`] carrying
/// [`INVALID_JOB_PARAMETERS`], which the processor records verbatim on the
/// failed job row.
pub fn decode_params<T: serde::de::DeserializeOwned>(
    request_data: &serde_json::Value,
) -> Result<T, CoreError> {
    serde_json::from_value(request_data.clone())
        .map_err(|_| CoreError::Validation(INVALID_JOB_PARAMETERS.to_string()))
}

// ---------------------------------------------------------------------------
// Progress math
// ---------------------------------------------------------------------------

/// Clamp a raw progress value into the valid [0, 100] range.
pub fn clamp_progress(percent: i16) -> i16 {
    percent.clamp(0, 100)
}

/// Progress after finishing `done` of `total` batch items.
///
/// `5 + round(90 * done / total)`, capped at 95 while the loop is still
/// running. Completion sets 100 separately so progress only ever reaches
/// 100 on a completed job.
pub fn batch_progress(done: usize, total: usize) -> i16 {
    if total == 0 {
        return 5;
    }
    let scaled = (90.0 * done as f64 / total as f64).round() as i16;
    (5 + scaled).min(95)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_validation() {
        assert!(validate_job_type("faq").is_ok());
        assert!(validate_job_type("image").is_ok());
        assert!(validate_job_type("content").is_ok());
        assert!(validate_job_type("video").is_err());
    }

    #[test]
    fn faq_params_round_trip() {
        let params = FaqJobParams {
            prompt_id: 7,
            target: FaqTarget::Product(5),
        };
        let value = serde_json::to_value(&params).unwrap();
        let decoded: FaqJobParams = decode_params(&value).unwrap();
        assert_eq!(decoded.prompt_id, 7);
        assert_eq!(decoded.target, FaqTarget::Product(5));
    }

    #[test]
    fn decode_rejects_missing_keys() {
        let value = serde_json::json!({ "prompt_id": 7 });
        let result: Result<ImageJobParams, _> = decode_params(&value);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), format!("Validation failed: {INVALID_JOB_PARAMETERS}"));
    }

    #[test]
    fn decode_rejects_wrong_types() {
        let value = serde_json::json!({ "product_id": "five", "prompt_ids": [1] });
        let result: Result<ImageJobParams, _> = decode_params(&value);
        assert!(result.is_err());
    }

    #[test]
    fn clamp_progress_bounds() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(50), 50);
        assert_eq!(clamp_progress(130), 100);
    }

    #[test]
    fn batch_progress_starts_above_zero() {
        assert_eq!(batch_progress(0, 4), 5);
    }

    #[test]
    fn batch_progress_is_monotonic() {
        let total = 7;
        let mut last = 0;
        for done in 0..=total {
            let p = batch_progress(done, total);
            assert!(p >= last, "progress went backwards at {done}/{total}");
            last = p;
        }
    }

    #[test]
    fn batch_progress_caps_at_95() {
        assert_eq!(batch_progress(4, 4), 95);
        assert_eq!(batch_progress(100, 100), 95);
    }

    #[test]
    fn batch_progress_empty_batch() {
        assert_eq!(batch_progress(0, 0), 5);
    }
}
