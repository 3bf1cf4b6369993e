//! Auth module: domain types, storage contract, request validation, token
//! issuance and the orchestration service.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;
pub mod validation;

pub use service::AuthService;
