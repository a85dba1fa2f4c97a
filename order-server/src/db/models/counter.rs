//! Sequence Counter Model
//!
//! One row per calendar day, keyed `orderNumber_{DDMMYY}`. Rows are created
//! implicitly on the first order of a new day and never deleted.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceCounter {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Monotonically incremented within the day; increments are serialized
    /// at the storage layer
    pub sequence_value: u32,
    /// Day key the counter belongs to (`DDMMYY`)
    #[serde(default)]
    pub date: String,
}
