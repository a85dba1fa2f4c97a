//! Durable notification ledger
//!
//! Mirrors the dashboard's notification center: one entry per `new-order`
//! event, persisted to a JSON file after every mutation so the unread state
//! survives restarts. A corrupt or missing file never blocks startup — the
//! ledger simply starts empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use shared::models::Order;

/// One persisted notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Ledger-local id
    pub id: String,
    /// Notification kind (`new-order` is the only kind recorded today)
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    /// Store id of the order this notification is about
    pub order_id: String,
    pub table_number: String,
    pub seen: bool,
    pub timestamp: DateTime<Utc>,
}

/// Notification ledger, newest first, persisted after every mutation
#[derive(Debug)]
pub struct NotificationLedger {
    path: PathBuf,
    entries: Vec<Notification>,
}

impl NotificationLedger {
    /// Load the ledger from `path`
    ///
    /// Missing or unreadable files start an empty ledger.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    /// Record a notification for a newly placed order
    pub fn record_new_order(&mut self, order: &Order) -> &Notification {
        let entry = Notification {
            id: format!("n-{}-{}", order.order_number, Utc::now().timestamp_millis()),
            notification_type: "new-order".to_string(),
            title: "New Order Received!".to_string(),
            message: format!(
                "Order {} from Table {}",
                order.order_number, order.table_number
            ),
            order_id: order.id.clone(),
            table_number: order.table_number.clone(),
            seen: false,
            timestamp: Utc::now(),
        };
        self.entries.insert(0, entry);
        self.persist();
        &self.entries[0]
    }

    /// Mark one notification as seen. Idempotent; seen never reverts.
    pub fn mark_as_seen(&mut self, id: &str) {
        let mut changed = false;
        if let Some(entry) = self.entries.iter_mut().find(|n| n.id == id)
            && !entry.seen
        {
            entry.seen = true;
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    /// Mark every notification as seen
    pub fn mark_all_as_seen(&mut self) {
        let mut changed = false;
        for entry in &mut self.entries {
            if !entry.seen {
                entry.seen = true;
                changed = true;
            }
        }
        if changed {
            self.persist();
        }
    }

    /// Number of unseen notifications
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.seen).count()
    }

    /// Permanently remove one notification
    pub fn clear(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Permanently remove every notification
    pub fn clear_all(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.persist();
        }
    }

    /// All notifications, newest first
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Write the whole ledger to disk (best-effort)
    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize notifications: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), "Failed to persist notifications: {e}");
        }
    }
}
