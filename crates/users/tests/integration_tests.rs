//! Registration and login against a real SQLite database.

use estate_auth::{PasswordHasher, Role, TokenManager};
use estate_config::DatabaseConfig;
use estate_database::initialize_database;
use estate_users::{UserError, UserService};
use uuid::Uuid;

const KEY: &str = "integration-signing-key";

async fn service() -> UserService<estate_users::UserRepository> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = initialize_database(&config).await.expect("database");

    UserService::new(
        pool,
        PasswordHasher::new(1024, 1, 1).expect("hasher"),
        TokenManager::new(KEY).expect("tokens"),
    )
}

#[tokio::test]
async fn register_login_round_trip_for_both_roles() {
    let service = service().await;
    let verifier = TokenManager::new(KEY).unwrap();

    for (email, role) in [("a@x.com", Role::Client), ("m@x.com", Role::Moderator)] {
        let user_id = service.register(email, "pass1", role.as_str()).await.unwrap();
        let token = service.login(user_id, "pass1").await.unwrap();

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role().unwrap(), role);
    }
}

#[tokio::test]
async fn second_registration_with_same_email_fails() {
    let service = service().await;
    let first = service.register("a@x.com", "pass1", "client").await.unwrap();

    let err = service
        .register("a@x.com", "pass2", "moderator")
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::UserAlreadyExists), "got {err:?}");

    // The original account still logs in with its own password and role.
    let token = service.login(first, "pass1").await.unwrap();
    let claims = TokenManager::new(KEY).unwrap().verify(&token).unwrap();
    assert_eq!(claims.role().unwrap(), Role::Client);
}

#[tokio::test]
async fn login_with_unknown_id_or_bad_password_fails() {
    let service = service().await;
    let user_id = service.register("a@x.com", "pass1", "client").await.unwrap();

    assert!(matches!(
        service.login(Uuid::now_v7(), "pass1").await,
        Err(UserError::UserNotFound)
    ));
    assert!(matches!(
        service.login(user_id, "pass2").await,
        Err(UserError::InvalidCredentials)
    ));
}
