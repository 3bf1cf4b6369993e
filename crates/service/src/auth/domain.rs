use std::fmt;

use chrono::{DateTime, Utc};

/// Identity record as the store returns it. The password hash rides along
/// for verification but must never reach logs or responses, hence the
/// hand-written `Debug`.
#[derive(Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Client application that login tokens are scoped to.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
