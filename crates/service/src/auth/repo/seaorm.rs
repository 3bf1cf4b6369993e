use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::auth::domain::{Application, User};
use crate::auth::repository::{CredentialStore, StoreError};
use models::errors::ModelError;

/// `CredentialStore` backed by the relational schema in `models`.
pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

fn map_err(e: ModelError) -> StoreError {
    match e {
        ModelError::Conflict(_) => StoreError::AlreadyExists,
        ModelError::Db(msg) => StoreError::Backend(msg),
    }
}

#[async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        let created = models::user::insert(&self.db, email, password_hash)
            .await
            .map_err(map_err)?;
        Ok(created.id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let found = models::user::find_by_email(&self.db, email)
            .await
            .map_err(map_err)?;
        found
            .map(|u| User {
                id: u.id,
                email: u.email,
                password_hash: u.password_hash,
                created_at: u.created_at.with_timezone(&Utc),
            })
            .ok_or(StoreError::NotFound)
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, StoreError> {
        let found = models::user::find_by_id(&self.db, user_id)
            .await
            .map_err(map_err)?;
        found.map(|u| u.is_admin).ok_or(StoreError::NotFound)
    }

    async fn find_application(&self, app_id: i64) -> Result<Application, StoreError> {
        let found = models::application::find_by_id(&self.db, app_id)
            .await
            .map_err(map_err)?;
        found
            .map(|a| Application {
                id: a.id,
                name: a.name,
                created_at: a.created_at.with_timezone(&Utc),
            })
            .ok_or(StoreError::NotFound)
    }

    async fn create_application(&self, name: &str) -> Result<i64, StoreError> {
        let created = models::application::insert(&self.db, name)
            .await
            .map_err(map_err)?;
        Ok(created.id)
    }
}
