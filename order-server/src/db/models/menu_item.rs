//! Menu Item Model
//!
//! Menu CRUD lives outside this service; the order store only reads menu
//! items to take server-trusted price/name snapshots at order time.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Current price — snapshotted into order lines at creation
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}
