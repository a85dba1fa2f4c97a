/// 服务器配置 - 点餐服务端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | /var/lib/order-server | 数据目录 (数据库、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | EVENT_CHANNEL_CAPACITY | 1024 | 事件总线容量 |
/// | CORS_ORIGIN | * | 允许的跨域来源 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/data/orders HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存储嵌入式数据库和日志文件
    pub data_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 事件总线广播通道容量
    pub event_channel_capacity: usize,
    /// CORS 允许的来源
    pub cors_origin: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "/var/lib/order-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(crate::realtime::bus::DEFAULT_CHANNEL_CAPACITY),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(data_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件路径
    pub fn db_path(&self) -> String {
        format!("{}/orders.db", self.data_dir)
    }
}
