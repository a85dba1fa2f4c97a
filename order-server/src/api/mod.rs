//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单管理接口
//! - `/ws` - WebSocket 升级 (见 [`crate::realtime::ws`])

pub mod convert;

pub mod health;
pub mod orders;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::realtime::ws;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// 组装完整的应用路由
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .route("/ws", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
