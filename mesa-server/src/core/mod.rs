//! 核心模块
//!
//! - [`config`] - 配置
//! - [`state`] - 服务器状态
//! - [`server`] - HTTP 服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
