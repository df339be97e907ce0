//! Domain error taxonomy.
//!
//! Local validation failures never reach the remote API call log; they
//! surface straight back to the caller as one of these variants. Remote
//! API failures are a separate type owned by the gateway crate.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (job, staged artifact, catalog entity) does not
    /// exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Caller input violates a domain rule (blank text, unknown
    /// language, missing modification reason, malformed job parameters).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation is not legal in the row's current review state.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Infrastructure failure the caller cannot fix (filesystem, rolled
    /// back catalog write).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the not-found case.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found("ProductFaq", 42);
        assert_eq!(err.to_string(), "Entity not found: ProductFaq with id 42");
    }

    #[test]
    fn validation_message_carries_detail() {
        let err = CoreError::Validation("question must not be blank".into());
        assert!(err.to_string().contains("question must not be blank"));
    }
}
