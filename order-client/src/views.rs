//! Derived views over the reconciled order list
//!
//! Everything here is a pure function of the reconciler's order list and is
//! recomputed after each mutation; none of it is authoritative state.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::collections::HashSet;

use shared::models::{Order, OrderStatus};

/// Dashboard headline numbers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    /// Revenue over all non-cancelled orders
    pub revenue: Decimal,
}

impl DashboardStats {
    pub fn compute(orders: &[Order]) -> Self {
        let mut stats = Self {
            total: orders.len(),
            ..Self::default()
        };
        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                _ => {}
            }
            if order.status != OrderStatus::Cancelled {
                stats.revenue += order.total_amount;
            }
        }
        stats
    }
}

/// Orders grouped per table, table order preserved by first appearance
#[derive(Debug, Clone, Default)]
pub struct TableOrderView {
    tables: Vec<(String, Vec<Order>)>,
}

impl TableOrderView {
    pub fn compute(orders: &[Order]) -> Self {
        let mut tables: Vec<(String, Vec<Order>)> = Vec::new();
        for order in orders {
            match tables.iter_mut().find(|(t, _)| t == &order.table_number) {
                Some((_, group)) => group.push(order.clone()),
                None => tables.push((order.table_number.clone(), vec![order.clone()])),
            }
        }
        Self { tables }
    }

    pub fn tables(&self) -> &[(String, Vec<Order>)] {
        &self.tables
    }

    pub fn orders_for(&self, table_number: &str) -> Option<&[Order]> {
        self.tables
            .iter()
            .find(|(t, _)| t == table_number)
            .map(|(_, g)| g.as_slice())
    }
}

/// One local-calendar-day bucket of orders
#[derive(Debug, Clone)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub orders: Vec<Order>,
}

/// Bucket orders by the local calendar day of `created_at`, buckets newest
/// day first. Within a bucket the incoming (arrival) order is preserved, so
/// status updates never reorder a day.
pub fn group_by_date(orders: &[Order]) -> Vec<DateGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Order>> = BTreeMap::new();
    for order in orders {
        let day = order.created_at.with_timezone(&Local).date_naive();
        buckets.entry(day).or_default().push(order.clone());
    }
    buckets
        .into_iter()
        .rev()
        .map(|(date, orders)| DateGroup { date, orders })
        .collect()
}

/// Order selection, keyed by order id
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Toggle a whole date group under the active status filter: if every
    /// visible order is selected, deselect them all; otherwise select them
    /// all. Orders hidden by the filter are never touched.
    pub fn toggle_group(&mut self, group: &DateGroup, filter: Option<OrderStatus>) {
        let visible: Vec<&str> = group
            .orders
            .iter()
            .filter(|o| filter.is_none_or(|f| o.status == f))
            .map(|o| o.id.as_str())
            .collect();
        if visible.is_empty() {
            return;
        }

        let all_selected = visible.iter().all(|id| self.selected.contains(*id));
        for id in visible {
            if all_selected {
                self.selected.remove(id);
            } else {
                self.selected.insert(id.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}
