//! `SeaOrmCredentialStore` against a live database. Skipped when
//! `DATABASE_URL` is not set so the suite stays runnable without postgres.

use migration::MigratorTrait;

use service::auth::repo::seaorm::SeaOrmCredentialStore;
use service::auth::repository::{CredentialStore, StoreError};

async fn store() -> Option<SeaOrmCredentialStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = models::db::connect(&url).await.expect("database connection");
    migration::Migrator::up(&db, None).await.expect("migrations");
    Some(SeaOrmCredentialStore { db })
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[tokio::test]
async fn save_user_enforces_unique_email_through_the_driver() {
    let Some(store) = store().await else { return };

    let email = format!("{}@example.com", unique("store-user"));
    let id = store.save_user(&email, "$argon2id$stub").await.unwrap();
    assert!(id > 0);

    let err = store.save_user(&email, "$argon2id$other").await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));

    let user = store.find_user_by_email(&email).await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email, email);
    assert!(!store.is_admin(id).await.unwrap());
}

#[tokio::test]
async fn applications_are_unique_by_name() {
    let Some(store) = store().await else { return };

    let name = unique("store-app");
    let app_id = store.create_application(&name).await.unwrap();

    let app = store.find_application(app_id).await.unwrap();
    assert_eq!(app.name, name);

    let err = store.create_application(&name).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists));
}

#[tokio::test]
async fn unknown_rows_surface_as_not_found() {
    let Some(store) = store().await else { return };

    let err = store.find_user_by_email("nobody@example.invalid").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    let err = store.is_admin(i64::MAX).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    let err = store.find_application(i64::MAX).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}
