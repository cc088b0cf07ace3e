//! Session Manager
//!
//! 会话生命周期的唯一所有者：登录时验证密码并签发令牌，
//! 注册时写入账户，登出与查询会话都在这里。
//! 业务组件从不接触令牌或密码哈希。

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::Arc;

use crate::auth::{CurrentUser, JwtService};
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Minimum password length accepted at sign-up
const MIN_PASSWORD_LEN: usize = 8;

/// Established session, as returned to the client
#[derive(Debug, Clone, serde::Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

/// Identity behind an already-validated token
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub email: String,
}

#[derive(Clone)]
pub struct SessionService {
    users: UserRepository,
    jwt: Arc<JwtService>,
}

impl SessionService {
    pub fn new(db: Surreal<Db>, jwt: Arc<JwtService>) -> Self {
        Self {
            users: UserRepository::new(db),
            jwt,
        }
    }

    /// Sign in with an email/password pair
    ///
    /// Failures deliberately collapse to one message so emails cannot be
    /// enumerated.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        validate_required_text(email, "email", MAX_EMAIL_LEN)?;
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::internal(format!("Stored password hash invalid: {e}")))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::invalid_credentials())?;

        let user_id = user
            .id
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("User record without id"))?;
        let token = self
            .jwt
            .generate_token(&user_id, &user.email)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

        tracing::info!(email = %user.email, "Operator signed in");
        Ok(Session {
            token,
            user_id,
            email: user.email,
        })
    }

    /// Create a new operator account
    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        validate_required_text(email, "email", MAX_EMAIL_LEN)?;
        validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        if !email.contains('@') {
            return Err(AppError::validation("email is not a valid address"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?
            .to_string();

        let created = self
            .users
            .create(User {
                id: None,
                email: email.to_string(),
                password_hash,
                created_at: now_millis(),
            })
            .await?;

        let user_id = created
            .id
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("User record without id"))?;
        let token = self
            .jwt
            .generate_token(&user_id, &created.email)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

        tracing::info!(email = %created.email, "Operator account created");
        Ok(Session {
            token,
            user_id,
            email: created.email,
        })
    }

    /// Tear down a session
    ///
    /// Tokens are stateless; teardown is the client discarding its token.
    /// Logged so sign-outs remain visible in the audit trail.
    pub fn sign_out(&self, user: &CurrentUser) {
        tracing::info!(email = %user.email, "Operator signed out");
    }

    /// The session behind a validated token
    pub fn current_session(&self, user: &CurrentUser) -> SessionInfo {
        SessionInfo {
            user_id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}
