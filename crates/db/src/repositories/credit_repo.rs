//! Repository for the `credit_history` ledger (PRD-03).

use sqlx::PgPool;

use crate::models::credit::{CreateCreditEntry, CreditEntry, CreditQuery};

/// Column list for `credit_history` queries.
const COLUMNS: &str = "\
    id, service, credits_used, credits_remaining, \
    entity_type, entity_id, detail, created_at";

/// Maximum page size for ledger listing.
const MAX_LIMIT: i64 = 500;

/// Default page size for ledger listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides append and query operations for the credit ledger.
pub struct CreditRepo;

impl CreditRepo {
    /// Append one ledger entry.
    pub async fn record(
        pool: &PgPool,
        entry: &CreateCreditEntry,
    ) -> Result<CreditEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO credit_history \
                 (service, credits_used, credits_remaining, entity_type, entity_id, detail) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreditEntry>(&query)
            .bind(&entry.service)
            .bind(entry.credits_used)
            .bind(entry.credits_remaining)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.detail)
            .fetch_one(pool)
            .await
    }

    /// List ledger entries, newest first, optionally filtered by service.
    pub async fn list(pool: &PgPool, params: &CreditQuery) -> Result<Vec<CreditEntry>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        match &params.service {
            Some(service) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM credit_history \
                     WHERE service = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, CreditEntry>(&query)
                    .bind(service)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM credit_history \
                     ORDER BY created_at DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, CreditEntry>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
