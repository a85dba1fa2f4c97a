//! Order lifecycle events
//!
//! One typed enum instead of ad hoc event-name string matching: the server
//! publishes these on its in-process bus and every socket observer receives
//! them as tagged JSON frames (`{"event": "new-order", "data": {...}}`).
//!
//! Delivery is best-effort, at-most-once per connected observer. There is no
//! replay: an observer that connects after an event fired only sees its
//! effect on the next bulk fetch.

use serde::{Deserialize, Serialize};

use crate::models::Order;

/// Server → client order lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum OrderEvent {
    /// A customer placed a new order
    NewOrder(Order),
    /// Staff changed an order's status
    OrderStatusUpdated(Order),
    /// Staff edited an order's item list
    OrderUpdated(Order),
    /// All orders for one table were cleared
    #[serde(rename_all = "camelCase")]
    TableOrdersCleared { table_number: String },
}

impl OrderEvent {
    /// Wire name of the event (`new-order`, `order-status-updated`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::NewOrder(_) => "new-order",
            OrderEvent::OrderStatusUpdated(_) => "order-status-updated",
            OrderEvent::OrderUpdated(_) => "order-updated",
            OrderEvent::TableOrdersCleared { .. } => "table-orders-cleared",
        }
    }

    /// The order carried by this event, if any
    pub fn order(&self) -> Option<&Order> {
        match self {
            OrderEvent::NewOrder(o)
            | OrderEvent::OrderStatusUpdated(o)
            | OrderEvent::OrderUpdated(o) => Some(o),
            OrderEvent::TableOrdersCleared { .. } => None,
        }
    }
}

/// Client → server socket frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Join the staff dashboard broadcast room
    JoinDashboard,
}
