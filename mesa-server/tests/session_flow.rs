//! Session tests: sign-up, sign-in, token round trip

mod common;

use std::sync::Arc;

use common::test_db;
use mesa_server::auth::{JwtConfig, JwtService, SessionService};
use mesa_server::utils::AppError;

fn test_jwt() -> Arc<JwtService> {
    Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-key-long-enough".to_string(),
        expiration_minutes: 60,
        issuer: "mesa-server".to_string(),
        audience: "mesa-clients".to_string(),
    }))
}

#[tokio::test]
async fn test_sign_up_then_sign_in() {
    let db = test_db().await;
    let jwt = test_jwt();
    let sessions = SessionService::new(db.clone(), jwt.clone());

    let created = sessions
        .sign_up("ops@example.com", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(created.email, "ops@example.com");
    assert!(!created.token.is_empty());

    let session = sessions
        .sign_in("ops@example.com", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(session.user_id, created.user_id);

    // Issued token validates and carries the identity
    let claims = jwt.validate_token(&session.token).unwrap();
    assert_eq!(claims.email, "ops@example.com");
    assert_eq!(claims.sub, session.user_id);
}

#[tokio::test]
async fn test_sign_in_wrong_password_rejected() {
    let db = test_db().await;
    let sessions = SessionService::new(db.clone(), test_jwt());

    sessions
        .sign_up("ops@example.com", "correct horse battery")
        .await
        .unwrap();

    let err = sessions
        .sign_in("ops@example.com", "wrong password!")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_sign_in_unknown_email_same_error_as_wrong_password() {
    let db = test_db().await;
    let sessions = SessionService::new(db.clone(), test_jwt());

    sessions
        .sign_up("ops@example.com", "correct horse battery")
        .await
        .unwrap();

    let unknown = sessions
        .sign_in("nobody@example.com", "whatever pass")
        .await
        .unwrap_err();
    let wrong = sessions
        .sign_in("ops@example.com", "whatever pass")
        .await
        .unwrap_err();
    // Identical message prevents email enumeration
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_duplicate_sign_up_rejected() {
    let db = test_db().await;
    let sessions = SessionService::new(db.clone(), test_jwt());

    sessions
        .sign_up("ops@example.com", "correct horse battery")
        .await
        .unwrap();
    let err = sessions
        .sign_up("ops@example.com", "another password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn test_sign_up_validation() {
    let db = test_db().await;
    let sessions = SessionService::new(db.clone(), test_jwt());

    let err = sessions.sign_up("not-an-email", "long enough pw").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let err = sessions.sign_up("ops@example.com", "short").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}
