//! Order wire model
//!
//! Field names follow the REST API JSON (camelCase). The server owns
//! persistence; clients only ever hold copies reconciled from fetches and
//! socket events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted length for free-text special requests
pub const SPECIAL_REQUESTS_MAX_LEN: usize = 500;

/// Order lifecycle status
///
/// Transitions are permissive by default: staff may move an order from any
/// status to any other (manual correction). [`OrderStatus::can_transition_to`]
/// describes the strict forward flow for deployments that opt into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether `next` is a forward step in the normal kitchen flow
    ///
    /// Only consulted under the strict transition policy; the default policy
    /// accepts any transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed | Cancelled)
                | (Confirmed, Preparing | Cancelled)
                | (Preparing, Ready | Cancelled)
                | (Ready, Served)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order
///
/// `name` and `price` are denormalized snapshots taken at order time, so
/// historical orders stay displayable after the referenced menu item is
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item id this line was ordered from
    pub menu_item: String,
    /// Item name at order time
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Unit price at order time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub special_instructions: String,
}

impl OrderLine {
    /// Line total (`price × quantity`)
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Sum of `price × quantity` over a set of lines
///
/// The single source of truth for `totalAmount`; the server recomputes with
/// this on create and on every item edit.
pub fn total_of(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(OrderLine::line_total).sum()
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned id (`order:xyz`)
    pub id: String,
    /// Human-readable, day-scoped number (`DDMMYY00001`), assigned once at
    /// creation and never regenerated
    pub order_number: String,
    pub table_number: String,
    pub items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub special_requests: String,
    /// Set once the item list is modified after creation
    #[serde(default)]
    pub is_edited: bool,
    /// Estimated preparation time in minutes
    #[serde(default = "default_estimated_time")]
    pub estimated_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_estimated_time() -> u32 {
    30
}

// ==================== Request Payloads ====================

/// Line input as submitted by a customer cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub menu_item: String,
    /// Display name fallback, used only when the menu item no longer exists
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Client-supplied unit price; the server prefers the menu item's
    /// current price and falls back to this value
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub special_instructions: String,
}

/// `POST /api/orders` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub table_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub items: Vec<OrderLineInput>,
    /// Client-computed total; ignored by the server, which recomputes from
    /// trusted prices
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub special_requests: String,
}

/// `PUT /api/orders/{id}/status` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// `PUT /api/orders/{id}/edit-items` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemsRequest {
    pub items: Vec<OrderLineInput>,
    /// Client-computed total; the server recomputes
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: u32, price: i64) -> OrderLine {
        OrderLine {
            menu_item: "menu_item:tea".into(),
            name: "Tea".into(),
            quantity: qty,
            price: Decimal::from(price),
            special_instructions: String::new(),
        }
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let lines = vec![line(2, 100), line(1, 50)];
        assert_eq!(total_of(&lines), Decimal::from(250));
    }

    #[test]
    fn strict_flow_steps_forward_only() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Served.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn order_round_trips_camel_case() {
        let json = serde_json::json!({
            "id": "order:abc",
            "orderNumber": "19112500001",
            "tableNumber": "5",
            "items": [],
            "totalAmount": 0.0,
            "status": "pending",
            "createdAt": "2025-11-19T12:00:00Z",
            "updatedAt": "2025-11-19T12:00:00Z"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.order_number, "19112500001");
        assert_eq!(order.estimated_time, 30);
        assert!(!order.is_edited);
    }
}
