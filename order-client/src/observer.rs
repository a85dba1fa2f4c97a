//! DashboardObserver — background WebSocket observer loop
//!
//! 1. Connect WebSocket to the order server
//! 2. Join the dashboard room
//! 3. Refetch the full order list (bulk fetch is ground truth)
//! 4. Apply incoming events to the shared reconciler
//! 5. Reconnect with exponential backoff on disconnect, refetching on each
//!    successful reconnect so the missed window is recovered

use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use shared::{ClientFrame, OrderEvent};

use crate::{ClientConfig, ClientError, ClientResult, HttpClient, NotificationLedger, OrderReconciler};

/// Initial reconnect delay
const INITIAL_RETRY_DELAY_SECS: u64 = 5;
/// Max reconnect delay
const MAX_RECONNECT_DELAY_SECS: u64 = 120;
/// WebSocket keepalive ping interval
const WS_PING_INTERVAL_SECS: u64 = 30;

pub struct DashboardObserver {
    config: ClientConfig,
    http: HttpClient,
    reconciler: Arc<Mutex<OrderReconciler>>,
    notifications: Option<Arc<Mutex<NotificationLedger>>>,
    shutdown: CancellationToken,
}

impl DashboardObserver {
    pub fn new(
        config: ClientConfig,
        reconciler: Arc<Mutex<OrderReconciler>>,
        shutdown: CancellationToken,
    ) -> Self {
        let http = config.build_http_client();
        // A configured ledger path opens (or creates) the ledger here;
        // `with_notifications` can still swap in a shared one
        let notifications = config
            .notifications_path
            .as_ref()
            .map(|path| Arc::new(Mutex::new(NotificationLedger::load(path))));
        Self {
            config,
            http,
            reconciler,
            notifications,
            shutdown,
        }
    }

    /// Attach a notification ledger; every `new-order` event is recorded
    pub fn with_notifications(mut self, ledger: Arc<Mutex<NotificationLedger>>) -> Self {
        self.notifications = Some(ledger);
        self
    }

    /// The notification ledger this observer records into, if any
    pub fn notifications(&self) -> Option<Arc<Mutex<NotificationLedger>>> {
        self.notifications.clone()
    }

    /// Main run loop — connect, observe, reconnect with backoff
    pub async fn run(self) {
        tracing::info!("DashboardObserver started");
        let mut reconnect_delay = Duration::from_secs(INITIAL_RETRY_DELAY_SECS);

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            match self.run_session().await {
                Ok(()) => {
                    // Clean shutdown of the session
                    break;
                }
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        delay_secs = reconnect_delay.as_secs(),
                        "Observer session ended: {e}"
                    );
                }
                Err(e) => {
                    // Server-side rejections still retry — the server may be
                    // mid-restart — but they are louder than network blips
                    tracing::error!(
                        delay_secs = reconnect_delay.as_secs(),
                        "Observer session failed: {e}"
                    );
                }
            }

            // Wait before reconnecting
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(reconnect_delay) => {},
            }
            reconnect_delay =
                (reconnect_delay * 2).min(Duration::from_secs(MAX_RECONNECT_DELAY_SECS));
        }

        tracing::info!("DashboardObserver stopped");
    }

    /// Run a single WebSocket session until disconnect or shutdown
    async fn run_session(&self) -> ClientResult<()> {
        let url = self.config.ws_url();
        let (ws, _) = connect_async(&url)
            .await
            .map_err(|e| ClientError::Socket(e.to_string()))?;
        tracing::info!(%url, "WebSocket connected");

        let (mut ws_sink, mut ws_stream) = ws.split();

        // Join the dashboard room before anything else
        let join = serde_json::to_string(&ClientFrame::JoinDashboard)?;
        ws_sink
            .send(Message::Text(join.into()))
            .await
            .map_err(|e| ClientError::Socket(e.to_string()))?;

        // Bulk fetch replaces local state; events from here on are deltas
        self.refetch().await?;

        let mut ping_interval =
            tokio::time::interval(Duration::from_secs(WS_PING_INTERVAL_SECS));
        ping_interval.tick().await; // skip immediate tick

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = ws_sink.close().await;
                    return Ok(());
                }

                // Keepalive ping
                _ = ping_interval.tick() => {
                    if ws_sink.send(Message::Ping(vec![].into())).await.is_err() {
                        return Err(ClientError::Socket("ping failed".to_string()));
                    }
                }

                // Incoming WS message
                msg = ws_stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_event(&text).await;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            let _ = ws_sink.send(Message::Pong(data)).await;
                        }
                        Some(Ok(Message::Close(_))) => {
                            return Err(ClientError::Socket("closed by server".to_string()));
                        }
                        Some(Err(e)) => {
                            return Err(ClientError::Socket(e.to_string()));
                        }
                        None => {
                            return Err(ClientError::Socket("stream ended".to_string()));
                        }
                        _ => {} // Binary, Pong — ignore
                    }
                }
            }
        }
    }

    /// Replace local state with the server's current order list
    async fn refetch(&self) -> ClientResult<()> {
        let orders = self.http.list_orders(None).await?;
        tracing::debug!(count = orders.len(), "Order list refetched");
        self.reconciler.lock().await.reset(orders);
        Ok(())
    }

    /// Apply one incoming event frame
    async fn handle_event(&self, text: &str) {
        let event: OrderEvent = match serde_json::from_str(text) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Invalid event frame: {e}");
                return;
            }
        };

        if let (Some(ledger), OrderEvent::NewOrder(order)) = (&self.notifications, &event) {
            ledger.lock().await.record_new_order(order);
        }

        let changed = self.reconciler.lock().await.apply(&event);
        tracing::debug!(event = event.name(), changed, "Event applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{Order, OrderStatus};

    fn order(number: &str, table: &str) -> Order {
        Order {
            id: format!("order:{number}"),
            order_number: number.to_string(),
            table_number: table.to_string(),
            items: vec![],
            total_amount: Decimal::from(100),
            status: OrderStatus::Pending,
            customer_name: String::new(),
            customer_phone: String::new(),
            special_requests: String::new(),
            is_edited: false,
            estimated_time: 30,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn configured_ledger_path_records_new_orders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.json");

        let config = ClientConfig::new("http://localhost:5000")
            .with_notifications_path(path.to_string_lossy());
        let observer = DashboardObserver::new(
            config,
            Arc::new(Mutex::new(OrderReconciler::new())),
            CancellationToken::new(),
        );
        let ledger = observer.notifications().expect("ledger opened from config");

        let frame =
            serde_json::to_string(&OrderEvent::NewOrder(order("19112500001", "5"))).unwrap();
        observer.handle_event(&frame).await;

        assert_eq!(ledger.lock().await.unread_count(), 1);
        assert_eq!(observer.reconciler.lock().await.len(), 1);
        // The ledger persisted to the configured path
        assert_eq!(NotificationLedger::load(&path).entries().len(), 1);
    }

    #[tokio::test]
    async fn observer_without_ledger_still_reconciles() {
        let observer = DashboardObserver::new(
            ClientConfig::default(),
            Arc::new(Mutex::new(OrderReconciler::new())),
            CancellationToken::new(),
        );
        assert!(observer.notifications().is_none());

        let frame =
            serde_json::to_string(&OrderEvent::NewOrder(order("19112500002", "7"))).unwrap();
        observer.handle_event(&frame).await;
        assert_eq!(observer.reconciler.lock().await.len(), 1);
    }
}
