//! 事件总线核心实现
//!
//! # 消息流
//!
//! ```text
//! HTTP handler ──▶ publish() ──▶ broadcast::Sender ──▶ 所有 WebSocket 会话
//! ```
//!
//! Publishing is fire-and-forget: a mutation commits to the database first
//! and the event is emitted after, so a full (or empty) channel can never
//! fail the HTTP request. Slow subscribers lag and drop old events rather
//! than exerting backpressure on handlers.

use shared::OrderEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Capacity of the broadcast channel (default: 1024)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// 订单事件总线 - 负责事件扇出
///
/// Clone 共享同一个底层通道。
#[derive(Debug, Clone)]
pub struct OrderEventBus {
    tx: broadcast::Sender<OrderEvent>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl OrderEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 订阅事件流
    ///
    /// A subscriber only receives events published after this call; there is
    /// no replay. Fresh observers reconcile with a bulk fetch instead.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    /// 发布事件 (fire-and-forget)
    ///
    /// Returns the number of subscribers that received the event. Zero
    /// subscribers is not an error.
    pub fn publish(&self, event: OrderEvent) -> usize {
        match self.tx.send(event.clone()) {
            Ok(n) => {
                debug!(event = event.name(), receivers = n, "Event published");
                n
            }
            Err(_) => {
                // No active subscribers
                debug!(event = event.name(), "Event published with no receivers");
                0
            }
        }
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// 通知所有 WebSocket 会话退出
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }
}

impl Default for OrderEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
