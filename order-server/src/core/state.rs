use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use shared::OrderEvent;

use crate::core::Config;
use crate::db::DbService;
use crate::realtime::{OrderEventBus, SocketSession};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务端的核心数据结构。使用 Arc 实现浅拷贝，
/// 所有权成本极低，每个 HTTP handler 和 WebSocket 会话各持一份。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | events | OrderEventBus | 订单事件总线 |
/// | sessions | Arc<DashMap<Uuid, SocketSession>> | WebSocket 会话注册表 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 订单事件总线
    pub events: OrderEventBus,
    /// 已连接的 WebSocket 会话
    pub sessions: Arc<DashMap<Uuid, SocketSession>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开数据库并创建事件总线。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.db_path())
            .await
            .map_err(|e| AppError::internal(format!("Failed to open database: {e}")))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            events: OrderEventBus::new(config.event_channel_capacity),
            sessions: Arc::new(DashMap::new()),
        })
    }

    /// 使用内存数据库初始化 (测试场景)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::memory()
            .await
            .map_err(|e| AppError::internal(format!("Failed to open database: {e}")))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            events: OrderEventBus::new(config.event_channel_capacity),
            sessions: Arc::new(DashMap::new()),
        })
    }

    /// 广播订单事件 (fire-and-forget)
    pub fn publish_event(&self, event: OrderEvent) {
        self.events.publish(event);
    }

    /// 当前 WebSocket 连接数
    pub fn connected_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// 其中已加入仪表盘的连接数
    pub fn dashboard_sessions(&self) -> usize {
        self.sessions
            .iter()
            .filter(|entry| entry.joined_dashboard)
            .count()
    }
}
