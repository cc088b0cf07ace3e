//! Session API Handlers

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::auth::session::{Session, SessionInfo};
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> AppResult<Json<Session>> {
    let session = state
        .sessions()
        .sign_in(&payload.email, &payload.password)
        .await?;
    Ok(Json(session))
}

/// POST /api/auth/signup - 注册新操作员
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> AppResult<Json<Session>> {
    let session = state
        .sessions()
        .sign_up(&payload.email, &payload.password)
        .await?;
    Ok(Json(session))
}

/// POST /api/auth/logout - 登出
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<bool>> {
    state.sessions().sign_out(&user);
    Ok(Json(true))
}

/// GET /api/auth/session - 当前会话
pub async fn session(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<SessionInfo>> {
    Ok(Json(state.sessions().current_session(&user)))
}
