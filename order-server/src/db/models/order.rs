//! Order Model (persisted)

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::models::OrderStatus;

/// One persisted order line — a denormalized snapshot taken at order time.
/// `menu_item` stays a plain string reference so the line survives deletion
/// of the menu item it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbOrderLine {
    pub menu_item: String,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default)]
    pub special_instructions: String,
}

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbOrder {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Day-scoped human-readable number, assigned exactly once at creation
    pub order_number: String,
    pub table_number: String,
    pub items: Vec<DbOrderLine>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default = "default_estimated_time")]
    pub estimated_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_estimated_time() -> u32 {
    30
}
