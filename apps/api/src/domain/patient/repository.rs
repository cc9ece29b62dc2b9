use super::entity::Patient;
use crate::domain::{care::entity::RecordCounts, shared::errors::DomainError};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn create(&self, patient: &Patient) -> Result<Patient, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, DomainError>;
    async fn update(&self, patient: &Patient) -> Result<Patient, DomainError>;
    /// Returns `false` when no such patient existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn record_counts(&self, patient_id: Uuid) -> Result<RecordCounts, DomainError>;
}
