//! Tests against a live database, applied schema included. Skipped when
//! `DATABASE_URL` is not set so the suite stays runnable without postgres.

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::errors::ModelError;
use crate::{application, db, user};

async fn connect_migrated() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = db::connect(&url).await.expect("database connection");
    migration::Migrator::up(&db, None).await.expect("migrations");
    Some(db)
}

/// Rows survive across test runs, so every run works on fresh keys.
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[tokio::test]
async fn duplicate_email_is_classified_as_conflict() {
    let Some(db) = connect_migrated().await else { return };

    let email = format!("{}@example.com", unique("models-user"));
    let created = user::insert(&db, &email, "$argon2id$stub").await.unwrap();
    assert!(created.id > 0);
    assert!(!created.is_admin);

    let err = user::insert(&db, &email, "$argon2id$other").await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    let found = user::find_by_email(&db, &email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn duplicate_application_name_is_classified_as_conflict() {
    let Some(db) = connect_migrated().await else { return };

    let name = unique("models-app");
    let created = application::insert(&db, &name).await.unwrap();

    let err = application::insert(&db, &name).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)));

    let found = application::find_by_id(&db, created.id).await.unwrap().unwrap();
    assert_eq!(found.name, name);
}

#[tokio::test]
async fn lookup_misses_are_none_not_errors() {
    let Some(db) = connect_migrated().await else { return };

    assert!(user::find_by_id(&db, i64::MAX).await.unwrap().is_none());
    assert!(application::find_by_id(&db, i64::MAX).await.unwrap().is_none());
}
