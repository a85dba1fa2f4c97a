//! Observer state reconciler
//!
//! One local mirror of the server's order list, shared by every observer
//! surface (dashboard, customer view, table view, notification center).
//! The bulk fetch is ground truth; socket events are applied incrementally
//! between fetches.
//!
//! An update event for an order that is not held locally is silently
//! dropped. This is an accepted eventual-consistency gap — the order
//! appears on the next bulk fetch; the reconciler never refetches on a
//! miss.

use shared::OrderEvent;
use shared::models::Order;

/// Local mirror of the server's order list, newest first
#[derive(Debug, Default, Clone)]
pub struct OrderReconciler {
    orders: Vec<Order>,
}

impl OrderReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire local state with a bulk fetch result
    pub fn reset(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// Apply one socket event to local state
    ///
    /// Returns `true` if local state changed.
    pub fn apply(&mut self, event: &OrderEvent) -> bool {
        match event {
            OrderEvent::NewOrder(order) => {
                // Duplicate delivery after a refetch race: keep the copy we have
                if self.orders.iter().any(|o| o.id == order.id) {
                    return false;
                }
                self.orders.insert(0, order.clone());
                true
            }
            OrderEvent::OrderStatusUpdated(order) | OrderEvent::OrderUpdated(order) => {
                match self.orders.iter_mut().find(|o| o.id == order.id) {
                    Some(existing) => {
                        *existing = order.clone();
                        true
                    }
                    // Unknown locally — drop, the next fetch reconciles
                    None => false,
                }
            }
            OrderEvent::TableOrdersCleared { table_number } => {
                let before = self.orders.len();
                self.orders.retain(|o| &o.table_number != table_number);
                self.orders.len() != before
            }
        }
    }

    /// Current local order list, newest first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}
