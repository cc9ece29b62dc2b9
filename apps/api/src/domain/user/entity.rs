use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::shared::errors::DomainError;

/// A clinician account.
///
/// Administrators manage other accounts and may edit or remove patients.
/// The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }
}

/// The user on whose behalf a request is executed.
///
/// Resolved once per request by the auth middleware and passed explicitly
/// into every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
}

impl Actor {
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }

    /// Records may only be read or changed by the clinician who wrote them.
    pub fn require_author(&self, author_id: Uuid) -> Result<(), DomainError> {
        if self.user_id == author_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}
