use async_trait::async_trait;
use thiserror::Error;

use super::domain::{Application, User};

/// Raw conditions raised at the storage boundary. The service translates
/// these into domain errors; they never cross it unwrapped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence contract for users and applications. Implementations must be
/// safe to call from many in-flight requests; uniqueness is enforced
/// atomically with the insert.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn is_admin(&self, user_id: i64) -> Result<bool, StoreError>;
    async fn find_application(&self, app_id: i64) -> Result<Application, StoreError>;
    async fn create_application(&self, name: &str) -> Result<i64, StoreError>;
}

/// Simple in-memory store for tests, doc examples and benches.
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    pub struct MemoryCredentialStore {
        inner: Mutex<Inner>,
    }

    struct Inner {
        users: HashMap<String, User>, // keyed by email
        admins: Vec<i64>,
        apps: HashMap<i64, Application>,
        next_user_id: i64,
        next_app_id: i64,
    }

    impl Default for MemoryCredentialStore {
        fn default() -> Self {
            Self {
                inner: Mutex::new(Inner {
                    users: HashMap::new(),
                    admins: Vec::new(),
                    apps: HashMap::new(),
                    next_user_id: 1,
                    next_app_id: 1,
                }),
            }
        }
    }

    impl MemoryCredentialStore {
        /// Grant the admin role to an existing user (test helper).
        pub fn set_admin(&self, user_id: i64) {
            self.inner.lock().unwrap().admins.push(user_id);
        }
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn save_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.users.contains_key(email) {
                return Err(StoreError::AlreadyExists);
            }
            let id = inner.next_user_id;
            inner.next_user_id += 1;
            inner.users.insert(
                email.to_string(),
                User {
                    id,
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                },
            );
            Ok(id)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
            let inner = self.inner.lock().unwrap();
            inner.users.get(email).cloned().ok_or(StoreError::NotFound)
        }

        async fn is_admin(&self, user_id: i64) -> Result<bool, StoreError> {
            let inner = self.inner.lock().unwrap();
            if !inner.users.values().any(|u| u.id == user_id) {
                return Err(StoreError::NotFound);
            }
            Ok(inner.admins.contains(&user_id))
        }

        async fn find_application(&self, app_id: i64) -> Result<Application, StoreError> {
            let inner = self.inner.lock().unwrap();
            inner.apps.get(&app_id).cloned().ok_or(StoreError::NotFound)
        }

        async fn create_application(&self, name: &str) -> Result<i64, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.apps.values().any(|a| a.name == name) {
                return Err(StoreError::AlreadyExists);
            }
            let id = inner.next_app_id;
            inner.next_app_id += 1;
            inner.apps.insert(
                id,
                Application { id, name: name.to_string(), created_at: Utc::now() },
            );
            Ok(id)
        }
    }
}
