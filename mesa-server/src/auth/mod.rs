//! 认证模块
//!
//! JWT 会话令牌 + Argon2 密码哈希。
//! [`SessionService`] 是唯一的会话管理组件：登录、注册、登出、查询当前会话
//! 都经过它；业务组件只看到中间件注入的 [`CurrentUser`]。

pub mod jwt;
pub mod middleware;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use session::SessionService;
