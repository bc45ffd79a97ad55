//! Run with a reachable PostgreSQL (DATABASE_URL) and `cargo test -- --ignored`.

mod common;

use common::random_email;
use common::TestDb;
use sso_service::config::ApplicationConfig;
use sso_service::domain::auth::errors::StorageError;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::models::EmailAddress;
use sso_service::domain::auth::models::UserId;
use sso_service::domain::auth::ports::ApplicationRepository;
use sso_service::domain::auth::ports::UserRepository;
use sso_service::outbound::repositories::PostgresApplicationRepository;
use sso_service::outbound::repositories::PostgresUserRepository;

fn email() -> EmailAddress {
    EmailAddress::new(random_email()).unwrap()
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_and_find_user() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let address = email();

    let user_id = repository.create_user(&address, b"hash").await.unwrap();
    let user = repository.find_by_email(&address).await.unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.email, address);
    assert_eq!(user.password_hash, b"hash".to_vec());
    assert!(!user.is_admin);
    assert_eq!(repository.is_admin(user_id).await, Ok(false));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_email_is_conflict() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    let address = email();

    repository.create_user(&address, b"first").await.unwrap();
    let result = repository.create_user(&address, b"second").await;

    assert_eq!(result, Err(StorageError::Conflict));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_missing_rows_are_not_found() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let applications = PostgresApplicationRepository::new(db.pool.clone());

    assert_eq!(users.find_by_email(&email()).await, Err(StorageError::NotFound));
    assert_eq!(users.is_admin(UserId(424242)).await, Err(StorageError::NotFound));
    assert_eq!(
        applications.find_by_id(AppId(424242)).await,
        Err(StorageError::NotFound)
    );

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_application_upserts() {
    let db = TestDb::new().await;
    let applications = PostgresApplicationRepository::new(db.pool.clone());

    applications
        .register(&ApplicationConfig {
            id: 7,
            name: "billing".to_string(),
            secret: "first-secret".to_string(),
        })
        .await
        .unwrap();
    applications
        .register(&ApplicationConfig {
            id: 7,
            name: "billing".to_string(),
            secret: "rotated-secret".to_string(),
        })
        .await
        .unwrap();

    let application = applications.find_by_id(AppId(7)).await.unwrap();
    assert_eq!(application.name, "billing");
    assert_eq!(application.secret.as_bytes(), b"rotated-secret");

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_pool_closed_is_unavailable() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());
    db.pool.close().await;

    let result = repository.find_by_email(&email()).await;

    assert!(matches!(result, Err(StorageError::Unavailable(_))));

    db.cleanup().await;
}
