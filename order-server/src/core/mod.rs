//! Core Module
//!
//! 配置、状态和服务器实现

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
