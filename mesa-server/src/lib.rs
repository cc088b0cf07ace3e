//! Mesa POS Server - 餐厅点餐收银系统
//!
//! # 架构概述
//!
//! 本模块是 POS 服务器的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与仓储层
//! - **认证** (`auth`): JWT + Argon2 会话体系
//! - **订单** (`orders`): 开台、点单、结账的业务规则
//! - **报表** (`reporting`): 支付记录与统计
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、会话管理
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! ├── db/            # 数据库层
//! ├── orders/        # 订单生命周期与结账
//! └── reporting/     # 支付记录与统计
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reporting;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, SessionService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use orders::{CheckoutProcessor, OrderLifecycle, Settlement};
pub use reporting::{HistoryService, StatisticsService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (工作目录 + 日志)
pub fn setup_environment(config: &Config) {
    // 日志目录需要先于 logger 存在，否则回退到标准输出
    let _ = config.ensure_work_dir_structure();
    let log_dir = config.log_dir();
    let log_dir_str = log_dir.to_string_lossy();
    init_logger_with_file(
        Some(&config.log_level),
        if config.environment == "production" {
            Some(log_dir_str.as_ref())
        } else {
            None
        },
    );
}
