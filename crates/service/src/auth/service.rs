use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;
use tracing::{error, info, instrument, warn};

use super::errors::AuthError;
use super::repository::{CredentialStore, StoreError};
use super::token::TokenIssuer;

/// Auth business service independent of the transport. Stateless between
/// calls: it holds only the store handle and the token issuer.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// Register a new user with a salted argon2 hash of the password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, repository::mock::MemoryCredentialStore, token::TokenIssuer};
    /// let store = Arc::new(MemoryCredentialStore::default());
    /// let issuer = TokenIssuer::new("secret", chrono::Duration::hours(1)).unwrap();
    /// let svc = AuthService::new(store, issuer);
    /// let user_id = tokio_test::block_on(svc.register_user("user@example.com", "Secret123")).unwrap();
    /// assert_eq!(user_id, 1);
    /// ```
    #[instrument(skip_all, fields(email = %email))]
    pub async fn register_user(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .to_string();

        let user_id = match self.store.save_user(email, &hash).await {
            Ok(id) => id,
            Err(StoreError::AlreadyExists) => return Err(AuthError::AlreadyExists),
            Err(e) => {
                error!(error = %e, "failed to save user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        info!(user_id, "user registered");
        Ok(user_id)
    }

    /// Authenticate a user against the stored hash and issue a token scoped
    /// to the target application.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, repository::mock::MemoryCredentialStore, token::TokenIssuer};
    /// let store = Arc::new(MemoryCredentialStore::default());
    /// let issuer = TokenIssuer::new("secret", chrono::Duration::hours(1)).unwrap();
    /// let svc = AuthService::new(store, issuer);
    /// let app_id = tokio_test::block_on(svc.create_application("web")).unwrap();
    /// let _ = tokio_test::block_on(svc.register_user("u@example.com", "Passw0rd")).unwrap();
    /// let token = tokio_test::block_on(svc.login("u@example.com", "Passw0rd", app_id)).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip_all, fields(email = %email, app_id))]
    pub async fn login(&self, email: &str, password: &str, app_id: i64) -> Result<String, AuthError> {
        let user = match self.store.find_user_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // indistinguishable from a wrong password; no account enumeration
                warn!("user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            warn!(user_id = user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match self.store.find_application(app_id).await {
            Ok(app) => app,
            Err(StoreError::NotFound) => {
                warn!("application not found");
                return Err(AuthError::InvalidAppId);
            }
            Err(e) => {
                error!(error = %e, "failed to fetch application");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        let token = self.issuer.issue(&user, &app)?;
        info!(user_id = user.id, app_id = app.id, "user logged in");
        Ok(token)
    }

    #[instrument(skip(self))]
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        match self.store.is_admin(user_id).await {
            Ok(is_admin) => {
                info!(is_admin, "admin role checked");
                Ok(is_admin)
            }
            Err(StoreError::NotFound) => {
                warn!("user not found");
                Err(AuthError::UserNotFound)
            }
            Err(e) => {
                error!(error = %e, "failed to check admin role");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }

    /// Bearer tokens are stateless, so there is no server-side session to
    /// tear down: logout checks that the presented token is one of ours and
    /// leaves expiry to the TTL. Clients discard the token on success.
    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.issuer.verify(token).map(|_| ())
    }

    /// Provision an application that login tokens can be scoped to.
    #[instrument(skip(self))]
    pub async fn create_application(&self, name: &str) -> Result<i64, AuthError> {
        match self.store.create_application(name).await {
            Ok(app_id) => {
                info!(app_id, "application created");
                Ok(app_id)
            }
            Err(StoreError::AlreadyExists) => Err(AuthError::AlreadyExists),
            Err(e) => {
                error!(error = %e, "failed to create application");
                Err(AuthError::Internal(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{decode, DecodingKey, Validation};

    use super::*;
    use crate::auth::repository::mock::MemoryCredentialStore;
    use crate::auth::token::Claims;

    const SECRET: &str = "unit-test-secret";
    const TTL_SECS: i64 = 600;

    fn service() -> (Arc<MemoryCredentialStore>, Arc<AuthService>) {
        let store = Arc::new(MemoryCredentialStore::default());
        let issuer = TokenIssuer::new(SECRET, Duration::seconds(TTL_SECS)).unwrap();
        let svc = Arc::new(AuthService::new(store.clone(), issuer));
        (store, svc)
    }

    fn decode_claims(token: &str) -> Claims {
        decode::<Claims>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &Validation::default())
            .unwrap()
            .claims
    }

    #[tokio::test]
    async fn register_returns_positive_id_and_rejects_duplicate() {
        let (_store, svc) = service();

        let id = svc.register_user("alice@example.com", "secret1").await.unwrap();
        assert!(id > 0);

        let err = svc.register_user("alice@example.com", "other-pass").await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[tokio::test]
    async fn login_issues_token_bound_to_user_and_app() {
        let (_store, svc) = service();
        let app_id = svc.create_application("test-app").await.unwrap();
        let user_id = svc.register_user("alice@example.com", "secret1").await.unwrap();

        let issued_at = Utc::now().timestamp();
        let token = svc.login("alice@example.com", "secret1", app_id).await.unwrap();

        let claims = decode_claims(&token);
        assert_eq!(claims.uid, user_id);
        assert_eq!(claims.app_id, app_id);
        assert_eq!(claims.exp, claims.iat + TTL_SECS);
        assert!((claims.exp - (issued_at + TTL_SECS)).abs() <= 2);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (_store, svc) = service();
        let app_id = svc.create_application("test-app").await.unwrap();
        svc.register_user("alice@example.com", "secret1").await.unwrap();

        let wrong_pass = svc.login("alice@example.com", "wrong-pass", app_id).await.unwrap_err();
        let no_user = svc.login("nobody@example.com", "secret1", app_id).await.unwrap_err();

        assert!(matches!(wrong_pass, AuthError::InvalidCredentials));
        assert!(matches!(no_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_pass.to_string(), no_user.to_string());
    }

    #[tokio::test]
    async fn login_with_unknown_app_fails_with_invalid_app_id() {
        let (_store, svc) = service();
        svc.register_user("alice@example.com", "secret1").await.unwrap();

        let err = svc.login("alice@example.com", "secret1", 42).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidAppId));
    }

    #[tokio::test]
    async fn is_admin_defaults_to_false_and_unknown_user_is_not_found() {
        let (store, svc) = service();
        let user_id = svc.register_user("alice@example.com", "secret1").await.unwrap();

        assert!(!svc.is_admin(user_id).await.unwrap());

        store.set_admin(user_id);
        assert!(svc.is_admin(user_id).await.unwrap());

        let err = svc.is_admin(9999).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn concurrent_registrations_with_distinct_emails_get_distinct_ids() {
        let (_store, svc) = service();

        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.register_user(&format!("user{i}@example.com"), "secret1").await
            }));
        }

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8, "ids must be distinct");
        assert!(ids.iter().all(|&id| id > 0));
    }

    #[tokio::test]
    async fn concurrent_registrations_with_same_email_have_one_winner() {
        let (_store, svc) = service();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move {
                svc.register_user("race@example.com", "secret1").await
            }));
        }

        let mut winners = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(id) => {
                    assert!(id > 0);
                    winners += 1;
                }
                Err(e) => assert!(matches!(e, AuthError::AlreadyExists)),
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn logout_accepts_issued_tokens_and_rejects_garbage() {
        let (_store, svc) = service();
        let app_id = svc.create_application("test-app").await.unwrap();
        svc.register_user("alice@example.com", "secret1").await.unwrap();
        let token = svc.login("alice@example.com", "secret1", app_id).await.unwrap();

        assert!(svc.logout(&token).is_ok());
        assert!(svc.logout("garbage").is_err());
    }
}
