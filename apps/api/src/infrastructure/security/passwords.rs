use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::error;

use crate::domain::{shared::errors::DomainError, user::repository::PasswordHasher};

/// bcrypt with a configurable work factor.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash(password, self.cost).map_err(|e| {
            error!("Password hashing failed: {}", e);
            DomainError::InfrastructureError("Password hashing failed".into())
        })
    }

    /// A malformed stored hash counts as a mismatch rather than an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        match verify(password, hash) {
            Ok(valid) => Ok(valid),
            Err(
                bcrypt::BcryptError::InvalidHash(_)
                | bcrypt::BcryptError::InvalidPrefix(_)
                | bcrypt::BcryptError::InvalidBase64(_),
            ) => Ok(false),
            Err(e) => {
                error!("Password verification failed: {}", e);
                Err(DomainError::InfrastructureError(
                    "Password verification failed".into(),
                ))
            }
        }
    }
}
