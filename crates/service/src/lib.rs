//! Service layer holding the authentication business logic.
//! - Separates credential handling and token issuance from the transport.
//! - Persists through the `CredentialStore` contract backed by `models`.
//! - Provides clear error types and documented interfaces.

pub mod auth;
