//! Signed bearer token issuance.
//!
//! The signing secret and TTL are injected at construction; nothing here
//! reads process globals, so tests can run with throwaway issuers.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::{Application, User};
use super::errors::AuthError;

/// Claims bind one user to one application with an absolute expiry in Unix
/// epoch seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub app_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Issuer("signing secret is empty".into()));
        }
        if ttl <= Duration::zero() {
            return Err(AuthError::Issuer("token ttl must be positive".into()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign an HS256 token with `exp = iat + ttl`.
    pub fn issue(&self, user: &User, app: &Application) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            uid: user.id,
            app_id: app.id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Issuer(e.to_string()))
    }

    /// Decode a token with the issuing secret, checking signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
