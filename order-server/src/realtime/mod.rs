//! 实时事件模块
//!
//! # 结构
//!
//! - [`bus`] - 进程内事件总线 (tokio broadcast)
//! - [`ws`] - WebSocket 网关 (dashboard 订阅端)

pub mod bus;
pub mod ws;

pub use bus::OrderEventBus;
pub use ws::SocketSession;
