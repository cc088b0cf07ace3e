use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, SessionService};
use crate::core::Config;
use crate::db::DbService;
use crate::orders::{CheckoutProcessor, OrderLifecycle};
use crate::reporting::{HistoryService, StatisticsService};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是核心数据结构，持有配置、数据库句柄和认证服务。
/// 使用 Arc 实现浅拷贝，所有权成本极低。业务服务
/// (订单、结账、报表) 很轻，由处理函数按需构造。
///
/// # 使用示例
///
/// ```ignore
/// // 构造订单服务
/// let lifecycle = state.lifecycle();
///
/// // 获取数据库连接
/// let db = state.db.clone();
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/mesa.db)
    /// 3. JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_path = config.database_dir().join("mesa.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        // 2. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
        }
    }

    /// 订单生命周期服务
    pub fn lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(self.db.clone())
    }

    /// 结账服务
    pub fn checkout(&self) -> CheckoutProcessor {
        CheckoutProcessor::new(self.db.clone())
    }

    /// 支付记录服务
    pub fn history(&self) -> HistoryService {
        HistoryService::new(self.db.clone())
    }

    /// 统计服务
    pub fn statistics(&self) -> StatisticsService {
        StatisticsService::new(self.db.clone())
    }

    /// 会话服务
    pub fn sessions(&self) -> SessionService {
        SessionService::new(self.db.clone(), self.jwt_service.clone())
    }
}
