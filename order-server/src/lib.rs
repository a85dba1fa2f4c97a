//! Order Server - QR 扫码点餐后端
//!
//! # 架构概述
//!
//! 本模块是点餐服务端的主入口，提供以下核心功能：
//!
//! - **订单存储** (`db`): 嵌入式 SurrealDB 持久化，含每日订单序号分配
//! - **事件广播** (`realtime`): 订单生命周期事件实时推送 (WebSocket)
//! - **HTTP API** (`api`): RESTful 订单接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (订单、序号计数器、菜单快照)
//! ├── realtime/      # 事件总线 + WebSocket 网关
//! └── utils/         # 错误、日志、时间工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod realtime;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use realtime::OrderEventBus;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
