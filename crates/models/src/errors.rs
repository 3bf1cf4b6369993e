use sea_orm::SqlErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("constraint violation: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify a driver error: unique-constraint violations become
    /// `Conflict`, everything else stays a plain database error.
    pub fn from_db(e: sea_orm::DbErr) -> Self {
        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            ModelError::Conflict(e.to_string())
        } else {
            ModelError::Db(e.to_string())
        }
    }
}
