//! Sequence Allocator
//!
//! Issues unique, monotonically increasing, per-day sequence numbers for
//! order numbering. The increment is a single SurrealQL statement (upsert +
//! increment + return), so it is atomic at the storage layer — a separate
//! read-then-write pair would reintroduce the duplicate-number race this
//! repository exists to prevent.
//!
//! Counters are scoped per day key and restart at 1 each new day. If the
//! increment fails the caller must fail order creation entirely; there is no
//! fallback numbering.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::SequenceCounter;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Build the full order number: `{dayKey}{sequence:05}`
///
/// Example: day key `191125`, sequence 7 → `19112500007`.
pub fn format_order_number(day_key: &str, sequence: u32) -> String {
    format!("{day_key}{sequence:05}")
}

/// Contended increments abort with a retryable conflict; bound the retries
/// so a genuinely broken store still fails order creation promptly.
const MAX_CONFLICT_RETRIES: u32 = 32;
const CONFLICT_BACKOFF: std::time::Duration = std::time::Duration::from_millis(2);

fn is_retryable_conflict(msg: &str) -> bool {
    msg.contains("can be retried") || msg.contains("read or write conflict")
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Counter record key for a day (`orderNumber_{DDMMYY}`)
    fn counter_key(day_key: &str) -> String {
        format!("orderNumber_{day_key}")
    }

    /// Atomically increment and return the sequence for `day_key`
    ///
    /// Creates the counter row at 1 when absent. Single statement — the
    /// storage engine serializes concurrent increments, so no two calls can
    /// ever observe the same value for one day key. The engine's optimistic
    /// transaction layer may abort a contended increment with a retryable
    /// read/write conflict; those attempts are retried in a bounded loop
    /// (each attempt is still the one atomic statement, so uniqueness is
    /// unaffected). Only non-retryable failures become `Allocation` errors.
    pub async fn next_sequence(&self, day_key: &str) -> RepoResult<u32> {
        let mut attempt = 0;
        loop {
            match self.try_next_sequence(day_key).await {
                Err(RepoError::Allocation(msg))
                    if attempt < MAX_CONFLICT_RETRIES && is_retryable_conflict(&msg) =>
                {
                    attempt += 1;
                    tokio::time::sleep(CONFLICT_BACKOFF * attempt).await;
                }
                other => return other,
            }
        }
    }

    async fn try_next_sequence(&self, day_key: &str) -> RepoResult<u32> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT type::thing('counter', $key) \
                 SET sequence_value = (sequence_value ?? 0) + 1, date = $date \
                 RETURN AFTER",
            )
            .bind(("key", Self::counter_key(day_key)))
            .bind(("date", day_key.to_string()))
            .await
            .map_err(|e| RepoError::Allocation(e.to_string()))?;

        let counters: Vec<SequenceCounter> = result
            .take(0)
            .map_err(|e| RepoError::Allocation(e.to_string()))?;
        counters
            .into_iter()
            .next()
            .map(|c| c.sequence_value)
            .ok_or_else(|| RepoError::Allocation("counter upsert returned no row".to_string()))
    }

    /// Current counter value for a day key, 0 when no order was numbered yet
    pub async fn current_value(&self, day_key: &str) -> RepoResult<u32> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::thing('counter', $key)")
            .bind(("key", Self::counter_key(day_key)))
            .await?;
        let counters: Vec<SequenceCounter> = result.take(0)?;
        Ok(counters.into_iter().next().map(|c| c.sequence_value).unwrap_or(0))
    }
}
