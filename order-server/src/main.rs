use order_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志)
    let _ = dotenv::dotenv();
    init_logger();

    // 2. 加载配置
    let config = Config::from_env();
    tracing::info!("Starting order server (env: {})", config.environment);

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
