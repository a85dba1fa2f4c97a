//! Order Client - observer-side library for the order server
//!
//! Provides network-based HTTP calls to the order API, a WebSocket observer
//! loop, and the local state every observer surface shares: the reconciler,
//! derived views and the notification ledger.

pub mod config;
pub mod error;
pub mod http;
pub mod notifications;
pub mod observer;
pub mod reconciler;
pub mod views;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notifications::{Notification, NotificationLedger};
pub use observer::DashboardObserver;
pub use reconciler::OrderReconciler;
pub use views::{DashboardStats, DateGroup, SelectionSet, TableOrderView, group_by_date};

// Re-export shared types for convenience
pub use shared::OrderEvent;
pub use shared::models::{Order, OrderStatus};
