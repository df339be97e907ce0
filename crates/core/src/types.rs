use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of a configured catalog language.
pub type LanguageId = i64;

/// Explicit request context threaded through every core operation.
///
/// Replaces the ambient "current language / current shop" globals of the
/// legacy module: every operation that shapes entity data for the remote
/// API or projects content onto the catalog receives its context as a
/// value, which keeps the core deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Language the operation runs in (fallback for unlocalized fields).
    pub language_id: LanguageId,
    /// Shop the operation runs in.
    pub shop_id: DbId,
}

impl RequestContext {
    pub fn new(language_id: LanguageId, shop_id: DbId) -> Self {
        Self {
            language_id,
            shop_id,
        }
    }
}
